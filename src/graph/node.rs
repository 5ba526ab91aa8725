//! Node implementation for the investment graph

use super::property::{PropertyMap, PropertyValue};
use super::types::{NodeId, NodeKind};
use serde::{Deserialize, Serialize};

/// A company or investor in the network
///
/// `key` is the external identifier from the source data (for example
/// `c:26569`); `id` is the dense store identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Dense identifier for this node
    pub id: NodeId,

    /// External identifier, unique within a store
    pub key: String,

    /// Company or investor
    pub kind: NodeKind,

    /// Display name
    pub name: String,

    /// Short label shown on the graph
    pub label: String,

    /// Industry / sector, when known
    pub industry: Option<String>,

    /// Region / location, when known
    pub region: Option<String>,

    /// Remaining attributes from the source data
    pub properties: PropertyMap,
}

impl Node {
    /// Create a node whose label is its key
    pub fn new(id: NodeId, key: impl Into<String>, kind: NodeKind, name: impl Into<String>) -> Self {
        let key = key.into();
        Node {
            id,
            label: key.clone(),
            key,
            kind,
            name: name.into(),
            industry: None,
            region: None,
            properties: PropertyMap::new(),
        }
    }

    /// Generated name for entities without a known name, e.g. `Company c:1`
    pub fn default_name(kind: NodeKind, key: &str) -> String {
        format!("{} {}", kind.display_prefix(), key)
    }

    pub fn is_company(&self) -> bool {
        self.kind == NodeKind::Company
    }

    pub fn is_investor(&self) -> bool {
        self.kind == NodeKind::Investor
    }

    /// Set a property value
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Option<PropertyValue> {
        self.properties.insert(key.into(), value.into())
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Case-insensitive substring match on key, name and label.
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.key.to_lowercase().contains(needle)
            || self.name.to_lowercase().contains(needle)
            || self.label.to_lowercase().contains(needle)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
