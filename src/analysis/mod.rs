//! Network analysis
//!
//! Adapters between the [`GraphStore`] and the topology algorithms in
//! `linkup-graph-algorithms`, plus the filtering, search and reporting
//! operations served by the HTTP API. Every operation reads the store and
//! returns an owned, serializable result.

pub mod centrality;
pub mod communities;
pub mod export;
pub mod filter;
pub mod pathways;
pub mod reports;
pub mod search;

pub use centrality::{compute_centrality, CentralityReport, CentralityStats, NodeCentrality, RankedNode};
pub use communities::{community_color, detect_communities, Community, CommunityMethod, CommunityReport, CommunityStats};
pub use export::{export_network, ExportDocument};
pub use filter::{FilteredNetwork, FilteredStats, NetworkFilter, TimePeriod};
pub use pathways::{find_pathways, shortest_path, PathStats, PathwayLimits, PathwayReport, PathwayRequest};
pub use reports::{build_report, AmountBuckets, CompanyActivity, ComponentSummary, InvestorActivity, NetworkReport};
pub use search::{node_details, search_nodes, NodeDetails};

use crate::dataset::{EdgeRecord, NodeRecord, RoundRecord};
use crate::graph::{Edge, GraphStore};
use linkup_graph_algorithms::GraphView;
use thiserror::Error;

/// Errors raised by analysis operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Node '{0}' not found")]
    NodeNotFound(String),

    #[error("{0}")]
    MissingParameter(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Build the undirected, simple topology view of the whole store.
///
/// Algorithm node ids are the store's dense node ids.
pub fn build_view(store: &GraphStore) -> GraphView {
    let index_to_node: Vec<u64> = store.nodes().iter().map(|n| n.id.as_u64()).collect();
    let edges: Vec<(usize, usize)> = store
        .edges()
        .iter()
        .map(|e| (e.source.as_u64() as usize, e.target.as_u64() as usize))
        .collect();
    GraphView::undirected(index_to_node, &edges)
}

/// Wire form of an edge, with round details inline
pub fn edge_record(store: &GraphStore, edge: &Edge) -> Option<EdgeRecord> {
    let source = store.get_node(edge.source)?;
    let target = store.get_node(edge.target)?;
    Some(EdgeRecord {
        source: source.key.clone(),
        target: target.key.clone(),
        id: Some(edge.key.clone()),
        round: RoundRecord::from_round(&edge.round),
    })
}

/// Wire form of a node
pub fn node_record(store: &GraphStore, id: crate::graph::NodeId) -> Option<NodeRecord> {
    store.get_node(id).map(NodeRecord::from_node)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::graph::{FundingRound, GraphStore, NodeKind};
    use chrono::NaiveDate;

    /// Two investor clusters joined through `c:3`, plus an isolated company.
    ///
    /// ```text
    /// f:1 - c:1 - f:2
    ///   \         /
    ///    c:2    c:3 - f:3 - c:4
    /// c:9 (isolated)
    /// ```
    pub fn sample_store() -> GraphStore {
        let mut store = GraphStore::new();
        for key in ["c:1", "c:2", "c:3", "c:4", "c:9"] {
            let id = store.add_node(key, NodeKind::Company, format!("Company {}", key));
            if let Some(node) = store.get_node_mut(id) {
                node.industry = Some(if key == "c:4" { "biotech" } else { "web" }.to_string());
                node.region = Some(if key == "c:1" { "SF Bay" } else { "New York" }.to_string());
            }
        }
        store.add_node("f:1", NodeKind::Investor, "Sequoia Capital");
        store.add_node("f:2", NodeKind::Investor, "Angel Fund");
        store.add_node("f:3", NodeKind::Investor, "Investor f:3");

        let date = |y| NaiveDate::from_ymd_opt(y, 6, 1).unwrap();
        let rounds = [
            ("f:1", "c:1", FundingRound::of_type("series-a").with_date(date(2008)).with_raised_amount(5_000_000.0)),
            ("f:1", "c:2", FundingRound::of_type("angel").with_date(date(2007)).with_raised_amount(300_000.0)),
            ("f:2", "c:1", FundingRound::of_type("angel").with_date(date(2009))),
            ("f:2", "c:3", FundingRound::of_type("series-b").with_raised_amount(25_000_000.0)),
            ("f:3", "c:3", FundingRound::of_type("venture").with_date(date(2011))),
            ("f:3", "c:4", FundingRound::of_type("angel").with_date(date(2012)).with_raised_amount(0.0)),
            ("f:1", "c:1", FundingRound::of_type("series-b").with_date(date(2010))),
        ];
        for (source, target, round) in rounds {
            store.add_edge_by_key(source, target, round).unwrap();
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::sample_store;
    use super::*;

    #[test]
    fn test_build_view_is_simple_and_symmetric() {
        let store = sample_store();
        let view = build_view(&store);

        assert_eq!(view.node_count, store.node_count());
        let c1 = store.node_id("c:1").unwrap().as_u64() as usize;
        // f:1 invests twice in c:1 but the view keeps one adjacency
        assert_eq!(view.out_degree(c1), 2);
        let c9 = store.node_id("c:9").unwrap().as_u64() as usize;
        assert_eq!(view.out_degree(c9), 0);
        assert_eq!(view.adjacency_len(), 2 * 6);
    }

    #[test]
    fn test_edge_record_inlines_round() {
        let store = sample_store();
        let record = edge_record(&store, &store.edges()[0]).unwrap();
        assert_eq!(record.source, "f:1");
        assert_eq!(record.target, "c:1");
        assert_eq!(record.id.as_deref(), Some("f:1-c:1"));
        assert_eq!(record.round.funding_round_type.as_deref(), Some("series-a"));
        assert_eq!(record.round.date.as_deref(), Some("2008-06-01"));
    }
}
