//! LinkUp investment network service
//!
//! Models a startup investment network (companies, investors and the
//! funding rounds connecting them), prepares it from Crunchbase-style CSV
//! exports and serves filtering and analysis over HTTP.
//!
//! # Layout
//!
//! - [`graph`]: in-memory store with dense ids and a key index
//! - [`dataset`]: network JSON documents and CSV sampling
//! - [`analysis`]: filtering, search, centrality, communities, pathways, reports
//! - [`http`]: axum API and the explorer pages
//! - [`config`]: server configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use linkup::analysis::{compute_centrality, find_pathways, PathwayLimits, PathwayRequest};
//! use linkup::graph::{FundingRound, GraphStore, NodeKind};
//!
//! let mut store = GraphStore::new();
//! store.add_node("c:1", NodeKind::Company, "Acme");
//! store.add_node("f:1", NodeKind::Investor, "Blue Capital");
//! store.add_edge_by_key("f:1", "c:1", FundingRound::of_type("series-a")).unwrap();
//!
//! let stats = store.statistics();
//! assert_eq!(stats.companies, 1);
//! assert_eq!(stats.funding_types["series-a"], 1);
//!
//! let centrality = compute_centrality(&store, 10);
//! assert_eq!(centrality.stats.max_degree, 1);
//!
//! let paths = find_pathways(&store, &PathwayRequest::new("c:1", "f:1"), PathwayLimits::default()).unwrap();
//! assert_eq!(paths.shortest_path_length, Some(2));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod graph;
pub mod http;
pub mod logging;

// Re-export main types for convenience
pub use config::{AnalysisConfig, ConfigError, ServerConfig};
pub use dataset::{load_network, save_network, DatasetBuilder, DatasetError, DatasetResult};
pub use graph::{
    Edge, EdgeId, FundingRound, GraphError, GraphResult, GraphStore, NetworkStats, Node, NodeId, NodeKind,
    PropertyMap, PropertyValue,
};
pub use http::{router, ApiError, AppState, HttpServer};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
