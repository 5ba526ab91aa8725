//! NetworkClient trait: the interface to a LinkUp server

use async_trait::async_trait;
use crate::error::LinkupResult;
use crate::models::{
    CentralityReport, CommunityReport, FilterOptions, FilterResult, Health, NetworkData, NetworkFilter,
    NetworkReport, NetworkStats, NodeDetails, PathwayReport, PathwayRequest, SdkNode,
};

/// Which dataset `GET /api/network` reads from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dataset {
    /// The sampled network loaded at startup
    #[default]
    Sample,
    /// The full dataset, loaded on first use
    Full,
}

/// Client interface for the LinkUp network API.
///
/// Every method maps to one endpoint; API failures surface as
/// [`LinkupError::Api`](crate::LinkupError::Api) carrying the server's message.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    async fn health(&self) -> LinkupResult<Health>;

    /// Whole network, optionally filtered
    async fn network(&self, dataset: Dataset, filter: &NetworkFilter) -> LinkupResult<NetworkData>;

    async fn network_stats(&self) -> LinkupResult<NetworkStats>;

    async fn filter_options(&self) -> LinkupResult<FilterOptions>;

    /// Filtered subgraph with its counts
    async fn filter_network(&self, filter: &NetworkFilter) -> LinkupResult<FilterResult>;

    /// Substring search over id, name and label
    async fn search(&self, query: &str, limit: Option<usize>) -> LinkupResult<Vec<SdkNode>>;

    async fn node(&self, id: &str) -> LinkupResult<NodeDetails>;

    async fn centrality(&self, limit: Option<usize>) -> LinkupResult<CentralityReport>;

    /// `method` is one of `components`, `label_propagation`, `attributes`
    async fn communities(&self, method: Option<&str>) -> LinkupResult<CommunityReport>;

    async fn pathways(&self, request: &PathwayRequest) -> LinkupResult<PathwayReport>;

    async fn report(&self) -> LinkupResult<NetworkReport>;

    /// Export document; returned as raw JSON for writing to disk
    async fn export(&self) -> LinkupResult<serde_json::Value>;
}
