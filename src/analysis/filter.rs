//! Network filtering
//!
//! Filters are applied in a fixed order (node type, region, sector, funding
//! type, time period, search) and the result only ever contains nodes and
//! edges of the original network.

use super::edge_record;
use crate::dataset::{EdgeRecord, NodeRecord};
use crate::graph::{GraphStore, NodeKind};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Relative time windows understood by the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePeriod {
    CurrentYear,
    PreviousYear,
    TwoYearsAgo,
    Last12Months,
    Last6Months,
}

impl TimePeriod {
    /// Earliest funding year still inside the window
    pub fn min_year(self, current_year: i32) -> i32 {
        match self {
            TimePeriod::CurrentYear | TimePeriod::Last6Months => current_year,
            TimePeriod::PreviousYear | TimePeriod::Last12Months => current_year - 1,
            TimePeriod::TwoYearsAgo => current_year - 2,
        }
    }
}

impl FromStr for TimePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2024" => Ok(TimePeriod::CurrentYear),
            "2023" => Ok(TimePeriod::PreviousYear),
            "2022" => Ok(TimePeriod::TwoYearsAgo),
            "last-12-months" => Ok(TimePeriod::Last12Months),
            "last-6-months" => Ok(TimePeriod::Last6Months),
            other => Err(format!("unknown time period '{}'", other)),
        }
    }
}

/// Filter criteria. `None`, empty strings and `"all"` leave a criterion unset.
///
/// Field names accept both `snake_case` (request bodies) and `camelCase`
/// (query strings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkFilter {
    #[serde(default, alias = "nodeType", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, alias = "fundingType", skip_serializing_if = "Option::is_none")]
    pub funding_type: Option<String>,
    #[serde(default, alias = "timePeriod", skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

fn active(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
        .map(str::to_lowercase)
}

/// Search terms are literal: `"all"` is searched for like any other text
fn search_term(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

/// Counts of a filtered network
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredStats {
    pub total_nodes: usize,
    pub total_edges: usize,
}

/// A subset of the network
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilteredNetwork {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl FilteredNetwork {
    pub fn stats(&self) -> FilteredStats {
        FilteredStats {
            total_nodes: self.nodes.len(),
            total_edges: self.edges.len(),
        }
    }
}

impl NetworkFilter {
    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        [&self.node_type, &self.region, &self.sector, &self.funding_type, &self.time_period]
            .into_iter()
            .all(|v| active(v).is_none())
            && search_term(&self.search).is_none()
    }

    /// Apply the filter relative to the current calendar year
    pub fn apply(&self, store: &GraphStore) -> FilteredNetwork {
        self.apply_at(store, chrono::Local::now().year())
    }

    /// Apply the filter with an explicit current year
    pub fn apply_at(&self, store: &GraphStore, current_year: i32) -> FilteredNetwork {
        let mut keep_node = vec![true; store.node_count()];
        let mut keep_edge = vec![true; store.edge_count()];

        if let Some(kind) = active(&self.node_type) {
            // An unknown type matches nothing
            let kind = NodeKind::from_str(&kind).ok();
            for node in store.nodes() {
                if Some(node.kind) != kind {
                    keep_node[node.id.as_u64() as usize] = false;
                }
            }
        }

        if let Some(region) = active(&self.region) {
            for node in store.nodes() {
                let value = node.region.as_deref().unwrap_or("").to_lowercase();
                if !value.contains(&region) {
                    keep_node[node.id.as_u64() as usize] = false;
                }
            }
        }

        if let Some(sector) = active(&self.sector) {
            for node in store.nodes() {
                let value = node.industry.as_deref().unwrap_or("").to_lowercase();
                if !value.contains(&sector) {
                    keep_node[node.id.as_u64() as usize] = false;
                }
            }
        }

        if let Some(funding_type) = active(&self.funding_type) {
            for edge in store.edges() {
                if !edge.round.round_type.to_lowercase().contains(&funding_type) {
                    keep_edge[edge.id.as_u64() as usize] = false;
                }
            }
            retain_touched(store, &mut keep_node, &keep_edge);
        }

        if let Some(period) = active(&self.time_period) {
            if let Ok(period) = TimePeriod::from_str(&period) {
                let min_year = period.min_year(current_year);
                for edge in store.edges() {
                    if edge.round.year().unwrap_or(current_year) < min_year {
                        keep_edge[edge.id.as_u64() as usize] = false;
                    }
                }
                retain_touched(store, &mut keep_node, &keep_edge);
            }
        }

        if let Some(term) = search_term(&self.search) {
            let matching: Vec<bool> = store
                .nodes()
                .iter()
                .map(|n| {
                    keep_node[n.id.as_u64() as usize]
                        && (n.name.to_lowercase().contains(&term) || n.label.to_lowercase().contains(&term))
                })
                .collect();

            let mut connected = matching.clone();
            for edge in store.edges().iter().filter(|e| keep_edge[e.id.as_u64() as usize]) {
                let (s, t) = (edge.source.as_u64() as usize, edge.target.as_u64() as usize);
                if matching[s] {
                    connected[t] = true;
                }
                if matching[t] {
                    connected[s] = true;
                }
            }
            for (keep, reached) in keep_node.iter_mut().zip(&connected) {
                *keep = *keep && *reached;
            }
        }

        // Edges survive only between surviving nodes
        for edge in store.edges() {
            let (s, t) = (edge.source.as_u64() as usize, edge.target.as_u64() as usize);
            if !(keep_node[s] && keep_node[t]) {
                keep_edge[edge.id.as_u64() as usize] = false;
            }
        }

        let network = FilteredNetwork {
            nodes: store
                .nodes()
                .iter()
                .filter(|n| keep_node[n.id.as_u64() as usize])
                .map(NodeRecord::from_node)
                .collect(),
            edges: store
                .edges()
                .iter()
                .filter(|e| keep_edge[e.id.as_u64() as usize])
                .filter_map(|e| edge_record(store, e))
                .collect(),
        };
        debug!(nodes = network.nodes.len(), edges = network.edges.len(), "Applied filters");
        network
    }
}

/// Keep only nodes touched by a remaining edge
fn retain_touched(store: &GraphStore, keep_node: &mut [bool], keep_edge: &[bool]) {
    let mut touched = vec![false; keep_node.len()];
    for edge in store.edges().iter().filter(|e| keep_edge[e.id.as_u64() as usize]) {
        touched[edge.source.as_u64() as usize] = true;
        touched[edge.target.as_u64() as usize] = true;
    }
    for (keep, hit) in keep_node.iter_mut().zip(touched) {
        *keep = *keep && hit;
    }
}
