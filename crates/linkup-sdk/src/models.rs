//! Data models for the LinkUp SDK
//!
//! These mirror the JSON bodies served under `/api`. Payloads arrive
//! wrapped in an [`Envelope`]; the client unwraps them before returning.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response envelope shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// `GET /api/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub success: bool,
    pub message: String,
}

/// A company or investor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdkNode {
    /// External id, e.g. `c:26569` or `f:12`
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    /// `company` or `investor`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// Any further attributes (country code, investor type, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SdkNode {
    /// Name if known, otherwise the id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// An investment edge with its round details inline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdkEdge {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub funding_round_type: Option<String>,
    #[serde(default)]
    pub raised_amount: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub pre_money_valuation: Option<f64>,
    #[serde(default)]
    pub post_money_valuation: Option<f64>,
}

/// Nodes and edges of a (possibly filtered) network
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkData {
    pub nodes: Vec<SdkNode>,
    pub edges: Vec<SdkEdge>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredStats {
    pub total_nodes: usize,
    pub total_edges: usize,
}

/// `POST /api/network/filter`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterResult {
    pub nodes: Vec<SdkNode>,
    pub edges: Vec<SdkEdge>,
    pub stats: FilteredStats,
}

/// Filter criteria; unset fields do not constrain the result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl NetworkFilter {
    /// Query-string pairs for the set fields
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("node_type", &self.node_type),
            ("region", &self.region),
            ("sector", &self.sector),
            ("funding_type", &self.funding_type),
            ("time_period", &self.time_period),
            ("search", &self.search),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.as_deref().map(|v| (k, v)))
        .collect()
    }
}

/// Earliest and latest funding dates (`YYYY-MM-DD`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub min: Option<String>,
    pub max: Option<String>,
}

/// `GET /api/network/stats`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub companies: usize,
    pub investors: usize,
    pub funding_types: BTreeMap<String, usize>,
    pub date_range: DateRange,
}

/// `GET /api/filters`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    pub funding_types: Vec<String>,
    pub node_types: Vec<String>,
    pub date_range: DateRange,
}

/// `GET /api/node/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDetails {
    pub node: SdkNode,
    pub connected_nodes: Vec<SdkNode>,
    pub connected_edges: Vec<SdkEdge>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeCentrality {
    pub degree: usize,
    pub normalized: f64,
    pub closeness: f64,
    pub betweenness: f64,
    pub pagerank: f64,
}

/// Node summary with its centrality scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    pub degree: usize,
    pub normalized: f64,
    pub closeness: f64,
    pub betweenness: f64,
    pub pagerank: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CentralityStats {
    pub avg_degree: f64,
    pub max_degree: usize,
    pub density: f64,
}

/// `POST /api/analysis/centrality`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CentralityReport {
    pub centrality: BTreeMap<String, NodeCentrality>,
    pub top_nodes: Vec<RankedNode>,
    pub stats: CentralityStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub name: String,
    pub nodes: Vec<String>,
    pub node_count: usize,
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

/// `POST /api/analysis/communities`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityReport {
    pub method: String,
    pub communities: Vec<Community>,
    pub community_count: usize,
    pub stats: CommunityStats,
}

/// Body of `POST /api/analysis/pathways`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayRequest {
    pub source_id: String,
    pub target_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStats {
    pub path_count: usize,
    pub avg_path_length: f64,
}

/// `POST /api/analysis/pathways`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayReport {
    pub paths: Vec<Vec<String>>,
    pub all_paths: Vec<Vec<String>>,
    pub shortest_path_length: Option<usize>,
    pub truncated: bool,
    pub stats: PathStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyActivity {
    pub id: String,
    pub name: String,
    pub degree: usize,
    pub industry: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestorActivity {
    pub id: String,
    pub name: String,
    pub activity: usize,
    pub investor_type: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountBuckets {
    pub no_data: usize,
    pub small: usize,
    pub medium: usize,
    pub large: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSummary {
    pub count: usize,
    pub largest: usize,
    pub isolated_nodes: usize,
}

/// `GET /api/reports/summary`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkReport {
    pub summary: NetworkStats,
    pub active_companies: Vec<CompanyActivity>,
    pub top_investors: Vec<InvestorActivity>,
    pub funding_type_distribution: BTreeMap<String, usize>,
    pub amount_distribution: AmountBuckets,
    pub degree_distribution: BTreeMap<usize, usize>,
    pub components: ComponentSummary,
}
