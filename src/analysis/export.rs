//! Analysis export document

use super::centrality::{compute_centrality, CentralityStats};
use super::communities::{detect_communities, CommunityMethod, CommunityStats};
use crate::graph::{GraphStore, NetworkStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub exported_at: DateTime<Utc>,
    pub summary: NetworkStats,
    pub centrality: CentralityStats,
    /// Keys of the most central nodes, by betweenness
    pub top_nodes: Vec<String>,
    pub community_method: CommunityMethod,
    pub community_count: usize,
    pub communities: CommunityStats,
}

/// Snapshot of the network summary and analysis statistics
pub fn export_network(store: &GraphStore, top_nodes: usize) -> ExportDocument {
    let centrality = compute_centrality(store, top_nodes);
    let communities = detect_communities(store, CommunityMethod::default());

    ExportDocument {
        exported_at: Utc::now(),
        summary: store.statistics(),
        centrality: centrality.stats,
        top_nodes: centrality.top_nodes.into_iter().map(|n| n.node.id).collect(),
        community_method: communities.method,
        community_count: communities.community_count,
        communities: communities.stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::sample_store;

    #[test]
    fn test_export() {
        let store = sample_store();
        let before = Utc::now();
        let export = export_network(&store, 3);

        assert!(export.exported_at >= before);
        assert_eq!(export.summary.total_nodes, 8);
        assert_eq!(export.top_nodes.len(), 3);
        assert_eq!(export.top_nodes[0], "f:2");
        assert_eq!(export.community_count, 2);
        assert_eq!(export.centrality.max_degree, 3);

        let json = serde_json::to_value(&export).unwrap();
        assert!(json["exportedAt"].is_string());
        assert_eq!(json["communityMethod"], "components");
    }
}
