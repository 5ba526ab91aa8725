//! Network JSON document
//!
//! ```json
//! {
//!   "nodes": [{"id": "c:1", "label": "c:1", "type": "company", "name": "Company c:1"}],
//!   "edges": [{"source": "f:1", "target": "c:1", "id": "f:1-c:1"}],
//!   "metadata": {"total_nodes": 2, "...": "..."},
//!   "edge_details": {"f:1-c:1": {"funding_round_type": "angel", "date": "2008-01-01"}}
//! }
//! ```
//!
//! Round details may also sit inline on each edge; inline fields take
//! precedence over `edge_details`.

use super::{DatasetError, DatasetResult};
use crate::graph::{
    parse_round_date, Edge, FundingRound, GraphStore, Node, NodeId, NodeKind, PropertyValue, UNKNOWN_ROUND_TYPE,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// Funding-round fields as stored in the document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_round_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raised_amount: Option<f64>,
    #[serde(default, alias = "funded_at", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_money_valuation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_money_valuation: Option<f64>,
}

impl RoundRecord {
    /// Field-wise merge; `self` wins where both are set
    pub fn or(self, fallback: RoundRecord) -> RoundRecord {
        RoundRecord {
            funding_round_type: self.funding_round_type.or(fallback.funding_round_type),
            raised_amount: self.raised_amount.or(fallback.raised_amount),
            date: self.date.or(fallback.date),
            pre_money_valuation: self.pre_money_valuation.or(fallback.pre_money_valuation),
            post_money_valuation: self.post_money_valuation.or(fallback.post_money_valuation),
        }
    }

    pub fn into_round(self) -> FundingRound {
        let round_type = self
            .funding_round_type
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty() && t != "nan")
            .unwrap_or_else(|| UNKNOWN_ROUND_TYPE.to_string());

        FundingRound {
            round_type,
            raised_amount: self.raised_amount.filter(|v| v.is_finite()),
            date: self.date.as_deref().and_then(parse_round_date),
            pre_money_valuation: self.pre_money_valuation.filter(|v| v.is_finite()),
            post_money_valuation: self.post_money_valuation.filter(|v| v.is_finite()),
        }
    }

    pub fn from_round(round: &FundingRound) -> Self {
        RoundRecord {
            funding_round_type: Some(round.round_type.clone()),
            raised_amount: round.raised_amount,
            date: round.date.map(|d| d.format("%Y-%m-%d").to_string()),
            pre_money_valuation: round.pre_money_valuation,
            post_money_valuation: round.post_money_valuation,
        }
    }
}

/// A node as stored in the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "sector", skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, alias = "location", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Any other scalar attributes (`investor_type`, `category`, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NodeRecord {
    pub fn from_node(node: &Node) -> Self {
        NodeRecord {
            id: node.key.clone(),
            label: Some(node.label.clone()),
            kind: node.kind,
            name: Some(node.name.clone()),
            industry: node.industry.clone(),
            region: node.region.clone(),
            extra: node
                .properties
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        }
    }

    /// Build a detached node; the store assigns the real id on insert
    pub fn into_node(self) -> Node {
        let name = self
            .name
            .unwrap_or_else(|| Node::default_name(self.kind, &self.id));
        let mut node = Node::new(NodeId::new(0), self.id, self.kind, name);
        if let Some(label) = self.label {
            node.label = label;
        }
        node.industry = self.industry;
        node.region = self.region;
        for (key, value) in self.extra {
            if let Some(value) = PropertyValue::from_json(&value) {
                node.properties.insert(key, value);
            }
        }
        node
    }
}

/// An edge as stored in the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub round: RoundRecord,
}

impl EdgeRecord {
    /// The edge key, generated from the endpoints when absent
    pub fn key(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| Edge::key_for(&self.source, &self.target))
    }
}

/// The on-disk network document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkDocument {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
    #[serde(default)]
    pub metadata: serde_json::Value,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub edge_details: IndexMap<String, RoundRecord>,
}

impl NetworkDocument {
    /// Document for a store, with round details under `edge_details`
    pub fn from_store(store: &GraphStore) -> DatasetResult<Self> {
        let mut edges = Vec::with_capacity(store.edge_count());
        let mut edge_details = IndexMap::new();

        for edge in store.edges() {
            let (source, target) = match (store.get_node(edge.source), store.get_node(edge.target)) {
                (Some(s), Some(t)) => (s.key.clone(), t.key.clone()),
                _ => {
                    return Err(DatasetError::InvalidData(format!(
                        "edge {} has a missing endpoint",
                        edge.key
                    )))
                }
            };
            edge_details.insert(edge.key.clone(), RoundRecord::from_round(&edge.round));
            edges.push(EdgeRecord {
                source,
                target,
                id: Some(edge.key.clone()),
                round: RoundRecord::default(),
            });
        }

        Ok(NetworkDocument {
            nodes: store.nodes().iter().map(NodeRecord::from_node).collect(),
            edges,
            metadata: serde_json::to_value(store.statistics())?,
            edge_details,
        })
    }

    /// Build a store from the document.
    ///
    /// Duplicate node ids and edges with an unknown endpoint are skipped
    /// with a warning, so every edge of the result has both endpoints.
    pub fn into_store(self) -> GraphStore {
        let NetworkDocument {
            nodes,
            edges,
            edge_details,
            ..
        } = self;

        let mut store = GraphStore::with_capacity(nodes.len(), edges.len());
        for record in nodes {
            if store.node_id(&record.id).is_some() {
                warn!(key = %record.id, "Duplicate node id in document; keeping first");
                continue;
            }
            store.insert_node(record.into_node());
        }

        let mut skipped = 0usize;
        for record in edges {
            let key = record.key();
            let details = edge_details.get(&key).cloned().unwrap_or_default();
            let round = record.round.or(details).into_round();

            match (store.node_id(&record.source), store.node_id(&record.target)) {
                (Some(source), Some(target)) => {
                    // Both endpoints exist, so this cannot fail
                    if let Ok(id) = store.add_edge(source, target, round) {
                        if let Some(edge) = store.get_edge_mut(id) {
                            edge.key = key;
                        }
                    }
                }
                _ => {
                    skipped += 1;
                    warn!(edge = %key, "Edge references an unknown node; skipping");
                }
            }
        }

        if skipped > 0 {
            warn!(skipped, "Skipped edges while loading network");
        }
        store
    }
}

/// Load a network document from disk into a graph store
pub fn load_network(path: impl AsRef<Path>) -> DatasetResult<GraphStore> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let document: NetworkDocument = serde_json::from_reader(reader)?;
    let store = document.into_store();
    info!(
        path = %path.display(),
        nodes = store.node_count(),
        edges = store.edge_count(),
        "Loaded network"
    );
    Ok(store)
}

/// Write a graph store as a pretty-printed network document
pub fn save_network(store: &GraphStore, path: impl AsRef<Path>) -> DatasetResult<()> {
    let path = path.as_ref();
    let document = NetworkDocument::from_store(store)?;
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writer.flush()?;
    info!(path = %path.display(), nodes = store.node_count(), edges = store.edge_count(), "Saved network");
    Ok(())
}
