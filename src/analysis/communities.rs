//! Community detection

use super::build_view;
use crate::graph::{GraphStore, NodeId};
use indexmap::IndexMap;
use linkup_graph_algorithms::{label_propagation, weakly_connected_components, Partition};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

const PALETTE: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8", "#F7DC6F", "#BB8FCE", "#85C1E2",
];

const LABEL_PROPAGATION_ITERATIONS: usize = 50;

/// How communities are formed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunityMethod {
    /// Connected components of the investment graph
    #[default]
    Components,
    /// Deterministic label propagation
    LabelPropagation,
    /// One group per node type, plus one per industry (groups overlap)
    Attributes,
}

impl CommunityMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommunityMethod::Components => "components",
            CommunityMethod::LabelPropagation => "label_propagation",
            CommunityMethod::Attributes => "attributes",
        }
    }
}

impl fmt::Display for CommunityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommunityMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "components" | "connected_components" => Ok(CommunityMethod::Components),
            "label_propagation" | "lpa" => Ok(CommunityMethod::LabelPropagation),
            "attributes" | "type" => Ok(CommunityMethod::Attributes),
            other => Err(format!("unknown community method '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub name: String,
    /// Member node keys
    pub nodes: Vec<String>,
    pub node_count: usize,
    /// Edges with both endpoints in the community
    pub internal_edges: usize,
    pub color: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityStats {
    pub largest_community: usize,
    pub avg_community_size: f64,
    pub modularity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityReport {
    pub method: CommunityMethod,
    /// Largest first
    pub communities: Vec<Community>,
    pub community_count: usize,
    pub stats: CommunityStats,
}

/// Stable palette colour for a community name.
///
/// Uses the 32-bit `hash * 31 + code_unit` string hash over UTF-16 code units.
pub fn community_color(name: &str) -> &'static str {
    let hash = name
        .encode_utf16()
        .fold(0i32, |h, c| h.wrapping_shl(5).wrapping_sub(h).wrapping_add(c as i32));
    PALETTE[((hash as i64).abs() % PALETTE.len() as i64) as usize]
}

/// Group nodes into communities with the given method
pub fn detect_communities(store: &GraphStore, method: CommunityMethod) -> CommunityReport {
    let groups: Vec<(String, Vec<NodeId>)> = match method {
        CommunityMethod::Components => {
            let view = build_view(store);
            named_partition(&weakly_connected_components(&view))
        }
        CommunityMethod::LabelPropagation => {
            let view = build_view(store);
            named_partition(&label_propagation(&view, LABEL_PROPAGATION_ITERATIONS))
        }
        CommunityMethod::Attributes => attribute_groups(store),
    };

    let degrees: Vec<usize> = store.nodes().iter().map(|n| store.degree(n.id)).collect();
    let m = store.edge_count() as f64;
    let mut modularity = 0.0;

    let mut communities: Vec<Community> = groups
        .into_iter()
        .map(|(name, members)| {
            let mut member = vec![false; store.node_count()];
            for id in &members {
                member[id.as_u64() as usize] = true;
            }
            let internal_edges = store
                .edges()
                .iter()
                .filter(|e| member[e.source.as_u64() as usize] && member[e.target.as_u64() as usize])
                .count();

            if m > 0.0 {
                let total_degree: usize = members.iter().map(|id| degrees[id.as_u64() as usize]).sum();
                modularity += internal_edges as f64 / m - (total_degree as f64 / (2.0 * m)).powi(2);
            }

            Community {
                color: community_color(&name).to_string(),
                nodes: members
                    .iter()
                    .filter_map(|id| store.get_node(*id))
                    .map(|n| n.key.clone())
                    .collect(),
                node_count: members.len(),
                internal_edges,
                name,
            }
        })
        .collect();
    communities.sort_by(|a, b| b.node_count.cmp(&a.node_count));

    let count = communities.len();
    let stats = CommunityStats {
        largest_community: communities.first().map(|c| c.node_count).unwrap_or(0),
        avg_community_size: if count > 0 {
            store.node_count() as f64 / count as f64
        } else {
            0.0
        },
        modularity,
    };

    debug!(method = %method, communities = count, modularity, "Detected communities");
    CommunityReport {
        method,
        communities,
        community_count: count,
        stats,
    }
}

/// Partition groups named `Community 1`, `Community 2`, ... by size
fn named_partition(partition: &Partition) -> Vec<(String, Vec<NodeId>)> {
    partition
        .sorted_by_size()
        .into_iter()
        .enumerate()
        .map(|(rank, members)| {
            (
                format!("Community {}", rank + 1),
                members.iter().map(|&id| NodeId::new(id)).collect(),
            )
        })
        .collect()
}

/// One group per node type, then one per industry. An industry named like a
/// type replaces that group in place.
fn attribute_groups(store: &GraphStore) -> Vec<(String, Vec<NodeId>)> {
    let mut groups: IndexMap<String, Vec<NodeId>> = IndexMap::new();
    for node in store.nodes() {
        groups.entry(node.kind.to_string()).or_default().push(node.id);
    }

    let mut industries: IndexMap<String, Vec<NodeId>> = IndexMap::new();
    for node in store.nodes() {
        if let Some(industry) = node.industry.as_deref().filter(|i| !i.is_empty()) {
            industries.entry(industry.to_string()).or_default().push(node.id);
        }
    }
    for (name, members) in industries {
        groups.insert(name, members);
    }

    groups.into_iter().collect()
}
