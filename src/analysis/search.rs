//! Node search and neighbourhood lookup

use super::{edge_record, AnalysisError, AnalysisResult};
use crate::dataset::{EdgeRecord, NodeRecord};
use crate::graph::GraphStore;
use serde::{Deserialize, Serialize};

/// Nodes whose key, name or label contain `query` (case-insensitive), in
/// node order. An empty query matches nothing.
pub fn search_nodes(store: &GraphStore, query: &str, limit: usize) -> Vec<NodeRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    store
        .nodes()
        .iter()
        .filter(|n| n.matches_text(&needle))
        .take(limit)
        .map(NodeRecord::from_node)
        .collect()
}

/// A node with its direct neighbourhood
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDetails {
    pub node: NodeRecord,
    pub connected_nodes: Vec<NodeRecord>,
    pub connected_edges: Vec<EdgeRecord>,
}

/// Look up a node by key together with its neighbours and incident edges
pub fn node_details(store: &GraphStore, key: &str) -> AnalysisResult<NodeDetails> {
    let node = store
        .node_by_key(key)
        .ok_or_else(|| AnalysisError::NodeNotFound(key.to_string()))?;

    let connected_nodes = store
        .neighbors(node.id)
        .into_iter()
        .filter_map(|id| store.get_node(id))
        .map(NodeRecord::from_node)
        .collect();
    let connected_edges = store
        .incident_edges(node.id)
        .into_iter()
        .filter_map(|e| edge_record(store, e))
        .collect();

    Ok(NodeDetails {
        node: NodeRecord::from_node(node),
        connected_nodes,
        connected_edges,
    })
}
