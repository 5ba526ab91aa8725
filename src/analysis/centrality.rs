//! Centrality analysis

use super::build_view;
use crate::dataset::NodeRecord;
use crate::graph::GraphStore;
use indexmap::IndexMap;
use linkup_graph_algorithms::{betweenness_centrality, closeness_centrality, page_rank, BetweennessConfig, PageRankConfig};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// Scores for one node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeCentrality {
    /// Incident edges, parallel investments counted separately
    pub degree: usize,
    /// `degree / max(1, n - 1)`
    pub normalized: f64,
    pub closeness: f64,
    pub betweenness: f64,
    pub pagerank: f64,
}

/// A node with its scores, as listed in `topNodes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNode {
    #[serde(flatten)]
    pub node: NodeRecord,
    #[serde(flatten)]
    pub scores: NodeCentrality,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CentralityStats {
    pub avg_degree: f64,
    pub max_degree: usize,
    pub density: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CentralityReport {
    /// Scores keyed by node key, in node order
    pub centrality: IndexMap<String, NodeCentrality>,
    /// Highest betweenness first
    pub top_nodes: Vec<RankedNode>,
    pub stats: CentralityStats,
}

/// Compute degree, closeness, betweenness and PageRank for every node.
///
/// `limit` bounds `top_nodes`, ranked by betweenness, then degree, then key.
pub fn compute_centrality(store: &GraphStore, limit: usize) -> CentralityReport {
    let start = Instant::now();
    let n = store.node_count();
    let m = store.edge_count();

    let view = build_view(store);
    let closeness = closeness_centrality(&view);
    let betweenness = betweenness_centrality(&view, BetweennessConfig::default());
    let pagerank = page_rank(&view, PageRankConfig::default());

    let denominator = n.saturating_sub(1).max(1) as f64;
    let centrality: IndexMap<String, NodeCentrality> = store
        .nodes()
        .iter()
        .map(|node| {
            let id = node.id.as_u64();
            let degree = store.degree(node.id);
            let scores = NodeCentrality {
                degree,
                normalized: degree as f64 / denominator,
                closeness: closeness.get(&id).copied().unwrap_or(0.0),
                betweenness: betweenness.get(&id).copied().unwrap_or(0.0),
                pagerank: pagerank.get(&id).copied().unwrap_or(0.0),
            };
            (node.key.clone(), scores)
        })
        .collect();

    let mut ranked: Vec<(&String, &NodeCentrality)> = centrality.iter().collect();
    ranked.sort_by(|(ka, a), (kb, b)| {
        b.betweenness
            .total_cmp(&a.betweenness)
            .then(b.degree.cmp(&a.degree))
            .then(ka.cmp(kb))
    });
    let top_nodes = ranked
        .into_iter()
        .take(limit)
        .filter_map(|(key, scores)| {
            store.node_by_key(key).map(|node| RankedNode {
                node: NodeRecord::from_node(node),
                scores: *scores,
            })
        })
        .collect();

    let stats = CentralityStats {
        avg_degree: if n > 0 { 2.0 * m as f64 / n as f64 } else { 0.0 },
        max_degree: centrality.values().map(|c| c.degree).max().unwrap_or(0),
        density: if n > 1 {
            2.0 * m as f64 / (n as f64 * (n - 1) as f64)
        } else {
            0.0
        },
    };

    debug!(nodes = n, edges = m, elapsed_ms = start.elapsed().as_millis() as u64, "Computed centrality");
    CentralityReport {
        centrality,
        top_nodes,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::sample_store;

    #[test]
    fn test_degree_and_stats() {
        let store = sample_store();
        let report = compute_centrality(&store, 10);

        assert_eq!(report.centrality.len(), 8);
        assert_eq!(report.centrality["c:1"].degree, 3);
        assert_eq!(report.centrality["c:9"].degree, 0);
        assert!((report.centrality["c:1"].normalized - 3.0 / 7.0).abs() < 1e-9);

        assert!((report.stats.avg_degree - 14.0 / 8.0).abs() < 1e-9);
        assert_eq!(report.stats.max_degree, 3);
        assert!((report.stats.density - 14.0 / 56.0).abs() < 1e-9);
    }

    #[test]
    fn test_scores_are_non_negative() {
        let store = sample_store();
        let report = compute_centrality(&store, 10);
        for scores in report.centrality.values() {
            assert!(scores.normalized >= 0.0);
            assert!(scores.closeness >= 0.0);
            assert!(scores.betweenness >= 0.0);
            assert!(scores.pagerank >= 0.0);
        }
        assert_eq!(report.centrality["c:9"].closeness, 0.0);
        assert_eq!(report.centrality["c:9"].betweenness, 0.0);
    }

    #[test]
    fn test_top_nodes_ranked_by_betweenness() {
        let store = sample_store();
        let report = compute_centrality(&store, 3);

        assert_eq!(report.top_nodes.len(), 3);
        for pair in report.top_nodes.windows(2) {
            assert!(pair[0].scores.betweenness >= pair[1].scores.betweenness);
        }
        // The connected part is the chain c:2 - f:1 - c:1 - f:2 - c:3 - f:3 - c:4
        assert_eq!(report.top_nodes[0].node.id, "f:2");
    }

    #[test]
    fn test_empty_store() {
        let report = compute_centrality(&GraphStore::new(), 10);
        assert!(report.top_nodes.is_empty());
        assert_eq!(report.stats, CentralityStats::default());
    }

    #[test]
    fn test_ranked_node_serializes_flat() {
        let store = sample_store();
        let report = compute_centrality(&store, 1);
        let json = serde_json::to_value(&report).unwrap();
        let top = &json["topNodes"][0];
        assert!(top["id"].is_string());
        assert!(top["betweenness"].is_number());
        assert!(json["stats"]["avgDegree"].is_number());
    }
}
