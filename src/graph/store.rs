//! In-memory investment graph storage
//!
//! Nodes and edges live in dense arenas indexed by their ids. External keys
//! are resolved through a hash index, so get-or-create is O(1) instead of a
//! scan over all nodes.

use super::edge::{Edge, FundingRound};
use super::node::Node;
use super::stats::{DateRange, FilterOptions, NetworkStats};
use super::types::{EdgeId, NodeId, NodeKind};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Node '{0}' not found")]
    UnknownNodeKey(String),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory graph storage
///
/// - nodes: NodeId -> Node (dense arena)
/// - edges: EdgeId -> Edge (dense arena)
/// - incident: NodeId -> Vec<EdgeId> (edges touching a node, either direction)
/// - key_index: external key -> NodeId
/// - role_conflicts: keys requested both as company and as investor
#[derive(Debug, Default, Clone)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    incident: Vec<Vec<EdgeId>>,
    key_index: FxHashMap<String, NodeId>,
    role_conflicts: Vec<String>,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with room for the given number of nodes and edges
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        GraphStore {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            incident: Vec::with_capacity(nodes),
            key_index: FxHashMap::default(),
            role_conflicts: Vec::new(),
        }
    }

    /// Get the node for `key`, creating it when absent.
    ///
    /// An existing node keeps its original kind and name; asking for a
    /// different kind is logged as a role conflict.
    pub fn add_node(&mut self, key: &str, kind: NodeKind, name: impl Into<String>) -> NodeId {
        if let Some(&existing) = self.key_index.get(key) {
            let node = &self.nodes[existing.index()];
            if node.kind != kind {
                warn!(key, existing = %node.kind, requested = %kind, "Entity appears in both roles; keeping first");
                self.record_role_conflict(key);
            }
            return existing;
        }

        let id = NodeId::new(self.nodes.len() as u64);
        self.nodes.push(Node::new(id, key, kind, name));
        self.incident.push(Vec::new());
        self.key_index.insert(key.to_string(), id);
        id
    }

    /// Keys that were requested in both roles, in the order first seen
    pub fn role_conflicts(&self) -> &[String] {
        &self.role_conflicts
    }

    pub(crate) fn record_role_conflict(&mut self, key: &str) {
        if !self.role_conflicts.iter().any(|k| k == key) {
            self.role_conflicts.push(key.to_string());
        }
    }

    /// Insert a fully built node, replacing its id with the next dense one.
    /// Returns the existing id when the key is already present.
    pub fn insert_node(&mut self, mut node: Node) -> NodeId {
        if let Some(&existing) = self.key_index.get(&node.key) {
            return existing;
        }
        let id = NodeId::new(self.nodes.len() as u64);
        node.id = id;
        self.key_index.insert(node.key.clone(), id);
        self.nodes.push(node);
        self.incident.push(Vec::new());
        id
    }

    /// Get a node by id
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by id
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Resolve an external key
    pub fn node_id(&self, key: &str) -> Option<NodeId> {
        self.key_index.get(key).copied()
    }

    /// Get a node by external key
    pub fn node_by_key(&self, key: &str) -> Option<&Node> {
        self.node_id(key).and_then(|id| self.get_node(id))
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Create an investment edge between existing nodes
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, round: FundingRound) -> GraphResult<EdgeId> {
        let source_key = self
            .get_node(source)
            .map(|n| n.key.clone())
            .ok_or(GraphError::InvalidEdgeSource(source))?;
        let target_key = self
            .get_node(target)
            .map(|n| n.key.as_str())
            .ok_or(GraphError::InvalidEdgeTarget(target))?;

        let id = EdgeId::new(self.edges.len() as u64);
        let key = Edge::key_for(&source_key, target_key);
        self.edges.push(Edge::new(id, key, source, target, round));

        self.incident[source.index()].push(id);
        if source != target {
            self.incident[target.index()].push(id);
        }
        Ok(id)
    }

    /// Create an edge between nodes given by external key
    pub fn add_edge_by_key(&mut self, source_key: &str, target_key: &str, round: FundingRound) -> GraphResult<EdgeId> {
        let source = self
            .node_id(source_key)
            .ok_or_else(|| GraphError::UnknownNodeKey(source_key.to_string()))?;
        let target = self
            .node_id(target_key)
            .ok_or_else(|| GraphError::UnknownNodeKey(target_key.to_string()))?;
        self.add_edge(source, target, round)
    }

    /// Get an edge by id
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// Get a mutable edge by id
    pub fn get_edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.index())
    }

    /// All nodes in id order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in id order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edges touching a node, in insertion order
    pub fn incident_edges(&self, id: NodeId) -> Vec<&Edge> {
        self.incident
            .get(id.index())
            .map(|ids| ids.iter().filter_map(|e| self.get_edge(*e)).collect())
            .unwrap_or_default()
    }

    /// Distinct neighbours of a node, in order of first connection
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        let mut seen = BTreeSet::new();
        self.incident_edges(id)
            .into_iter()
            .filter_map(|e| e.other_end(id))
            .filter(|n| seen.insert(*n))
            .collect()
    }

    /// Number of incident edges (parallel investments count separately)
    pub fn degree(&self, id: NodeId) -> usize {
        self.incident.get(id.index()).map(Vec::len).unwrap_or(0)
    }

    /// Nodes of one kind, in id order
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node and edge counts, funding-type distribution and date range.
    ///
    /// Funding types are counted once per edge, in order of first appearance.
    pub fn statistics(&self) -> NetworkStats {
        let mut funding_types: IndexMap<String, usize> = IndexMap::new();
        for edge in &self.edges {
            *funding_types.entry(edge.round.round_type.clone()).or_insert(0) += 1;
        }

        NetworkStats {
            total_nodes: self.node_count(),
            total_edges: self.edge_count(),
            companies: self.nodes_of_kind(NodeKind::Company).count(),
            investors: self.nodes_of_kind(NodeKind::Investor).count(),
            funding_types,
            date_range: self.date_range(),
        }
    }

    /// Earliest and latest round dates over all dated edges
    pub fn date_range(&self) -> DateRange {
        self.edges
            .iter()
            .filter_map(|e| e.round.date)
            .fold(DateRange::default(), |range, date| range.include(date))
    }

    /// Values available for filtering the network
    pub fn filter_options(&self) -> FilterOptions {
        let funding_types: BTreeSet<&str> = self.edges.iter().map(|e| e.round.round_type.as_str()).collect();
        let node_types: BTreeSet<NodeKind> = self.nodes.iter().map(|n| n.kind).collect();

        FilterOptions {
            funding_types: funding_types.into_iter().map(str::to_string).collect(),
            node_types: node_types.into_iter().collect(),
            date_range: self.date_range(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_store() -> GraphStore {
        let mut store = GraphStore::new();
        let c1 = store.add_node("c:1", NodeKind::Company, "Acme");
        let c2 = store.add_node("c:2", NodeKind::Company, "Globex");
        let f1 = store.add_node("f:1", NodeKind::Investor, "Fund One");
        let p1 = store.add_node("p:1", NodeKind::Investor, "Angel Person");

        store.add_edge(f1, c1, FundingRound::of_type("series-a").with_date(date(2010, 5, 1))).unwrap();
        store.add_edge(f1, c2, FundingRound::of_type("angel").with_date(date(2007, 1, 9))).unwrap();
        store.add_edge(p1, c1, FundingRound::of_type("angel")).unwrap();
        store.add_edge(f1, c1, FundingRound::of_type("series-b")).unwrap();
        store
    }

    #[test]
    fn test_add_node_deduplicates_by_key() {
        let mut store = GraphStore::new();
        let a = store.add_node("c:1", NodeKind::Company, "Acme");
        let b = store.add_node("c:1", NodeKind::Company, "Other name");
        assert_eq!(a, b);
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.get_node(a).unwrap().name, "Acme");
    }

    #[test]
    fn test_role_conflict_keeps_first_kind() {
        let mut store = GraphStore::new();
        let a = store.add_node("c:9", NodeKind::Company, "Dual");
        let b = store.add_node("c:9", NodeKind::Investor, "Dual");
        store.add_node("c:9", NodeKind::Investor, "Dual");
        assert_eq!(a, b);
        assert!(store.get_node(a).unwrap().is_company());
        assert_eq!(store.role_conflicts(), ["c:9".to_string()]);

        store.add_node("c:9", NodeKind::Company, "Dual");
        store.add_node("f:1", NodeKind::Investor, "Solo");
        assert_eq!(store.role_conflicts().len(), 1);
    }

    #[test]
    fn test_ids_are_dense() {
        let store = sample_store();
        for (i, node) in store.nodes().iter().enumerate() {
            assert_eq!(node.id.as_u64(), i as u64);
        }
        for (i, edge) in store.edges().iter().enumerate() {
            assert_eq!(edge.id.as_u64(), i as u64);
        }
    }

    #[test]
    fn test_edge_requires_existing_nodes() {
        let mut store = GraphStore::new();
        let c = store.add_node("c:1", NodeKind::Company, "Acme");
        let err = store.add_edge(NodeId::new(5), c, FundingRound::default()).unwrap_err();
        assert_eq!(err, GraphError::InvalidEdgeSource(NodeId::new(5)));

        let err = store.add_edge(c, NodeId::new(6), FundingRound::default()).unwrap_err();
        assert_eq!(err, GraphError::InvalidEdgeTarget(NodeId::new(6)));

        let err = store.add_edge_by_key("f:x", "c:1", FundingRound::default()).unwrap_err();
        assert_eq!(err, GraphError::UnknownNodeKey("f:x".to_string()));
    }

    #[test]
    fn test_neighbors_and_degree() {
        let store = sample_store();
        let c1 = store.node_id("c:1").unwrap();
        let f1 = store.node_id("f:1").unwrap();

        // c:1 has three investments from two distinct investors
        assert_eq!(store.degree(c1), 3);
        assert_eq!(store.neighbors(c1).len(), 2);
        assert_eq!(store.degree(f1), 3);
        assert_eq!(store.incident_edges(f1)[0].key, "f:1-c:1");
    }

    #[test]
    fn test_statistics() {
        let store = sample_store();
        let stats = store.statistics();

        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.total_edges, 4);
        assert_eq!(stats.companies, 2);
        assert_eq!(stats.investors, 2);
        assert_eq!(stats.total_nodes, stats.companies + stats.investors);
        assert_eq!(stats.funding_types["angel"], 2);
        assert_eq!(stats.funding_types.keys().next().unwrap(), "series-a");
        assert_eq!(stats.date_range.min, Some(date(2007, 1, 9)));
        assert_eq!(stats.date_range.max, Some(date(2010, 5, 1)));
    }

    #[test]
    fn test_filter_options_sorted() {
        let store = sample_store();
        let options = store.filter_options();
        assert_eq!(options.funding_types, vec!["angel", "series-a", "series-b"]);
        assert_eq!(options.node_types, vec![NodeKind::Company, NodeKind::Investor]);
    }

    #[test]
    fn test_empty_store_statistics() {
        let stats = GraphStore::new().statistics();
        assert_eq!(stats.total_nodes, 0);
        assert!(stats.funding_types.is_empty());
        assert_eq!(stats.date_range, DateRange::default());
    }
}
