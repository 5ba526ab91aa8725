//! Aggregate views over a graph store

use super::types::NodeKind;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Earliest and latest funding dates; both `None` when nothing is dated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

impl DateRange {
    /// Widen the range to cover `date`
    pub fn include(self, date: NaiveDate) -> Self {
        DateRange {
            min: Some(self.min.map_or(date, |m| m.min(date))),
            max: Some(self.max.map_or(date, |m| m.max(date))),
        }
    }
}

/// Network summary statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub companies: usize,
    pub investors: usize,
    /// Edge count per funding round type, in order of first appearance
    pub funding_types: IndexMap<String, usize>,
    pub date_range: DateRange,
}

/// Values a client may filter the network by
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub funding_types: Vec<String>,
    pub node_types: Vec<NodeKind>,
    pub date_range: DateRange,
}
