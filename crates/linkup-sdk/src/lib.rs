//! LinkUp SDK: client library for the LinkUp investment network API
//!
//! [`RemoteClient`] talks to a running server over HTTP and implements the
//! [`NetworkClient`] trait, one method per endpoint.
//!
//! # Quick Start
//!
//! ```no_run
//! use linkup_sdk::{NetworkClient, RemoteClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = RemoteClient::new("http://localhost:5000");
//!     let stats = client.network_stats().await.unwrap();
//!     println!("{} nodes, {} edges", stats.total_nodes, stats.total_edges);
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod remote;

pub use client::{Dataset, NetworkClient};
pub use error::{LinkupError, LinkupResult};
pub use models::{
    AmountBuckets, CentralityReport, CentralityStats, Community, CommunityReport, CommunityStats, CompanyActivity,
    ComponentSummary, DateRange, FilterOptions, FilterResult, FilteredStats, Health, InvestorActivity, NetworkData,
    NetworkFilter, NetworkReport, NetworkStats, NodeCentrality, NodeDetails, PathStats, PathwayReport,
    PathwayRequest, RankedNode, SdkEdge, SdkNode,
};
pub use remote::RemoteClient;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
