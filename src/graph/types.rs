//! Core type definitions for the investment graph

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dense identifier for a node, assigned by the store in insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        NodeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// Dense identifier for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeId(pub u64);

impl EdgeId {
    pub fn new(id: u64) -> Self {
        EdgeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({})", self.0)
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        EdgeId(id)
    }
}

/// Role of an entity in the investment network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A funded object
    Company,
    /// An entity that took part in a funding round
    Investor,
}

impl NodeKind {
    pub const ALL: [NodeKind; 2] = [NodeKind::Company, NodeKind::Investor];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Company => "company",
            NodeKind::Investor => "investor",
        }
    }

    /// Prefix used for generated display names
    pub fn display_prefix(&self) -> &'static str {
        match self {
            NodeKind::Company => "Company",
            NodeKind::Investor => "Investor",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "company" => Ok(NodeKind::Company),
            "investor" => Ok(NodeKind::Investor),
            other => Err(format!("unknown node type '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(42);
        assert_eq!(id.as_u64(), 42);
        assert_eq!(format!("{}", id), "NodeId(42)");

        let id2: NodeId = 100.into();
        assert_eq!(id2.as_u64(), 100);
    }

    #[test]
    fn test_edge_id() {
        let id = EdgeId::new(99);
        assert_eq!(id.as_u64(), 99);
        assert_eq!(format!("{}", id), "EdgeId(99)");
    }

    #[test]
    fn test_node_kind_parse_and_serde() {
        assert_eq!("Company".parse::<NodeKind>().unwrap(), NodeKind::Company);
        assert_eq!(" investor ".parse::<NodeKind>().unwrap(), NodeKind::Investor);
        assert!("vc".parse::<NodeKind>().is_err());

        assert_eq!(serde_json::to_string(&NodeKind::Investor).unwrap(), "\"investor\"");
        let kind: NodeKind = serde_json::from_str("\"company\"").unwrap();
        assert_eq!(kind, NodeKind::Company);
    }

    #[test]
    fn test_id_ordering() {
        let id1 = NodeId::new(1);
        let id2 = NodeId::new(2);
        assert!(id1 < id2);
    }
}
