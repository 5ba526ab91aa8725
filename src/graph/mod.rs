//! Investment graph data model
//!
//! Companies and investors are nodes; every investment is a directed edge
//! from investor to company carrying the funding-round details. The store
//! keeps both in dense arenas with a hash index over external keys.

pub mod edge;
pub mod node;
pub mod property;
pub mod stats;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::{parse_round_date, Edge, FundingRound, UNKNOWN_ROUND_TYPE};
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use stats::{DateRange, FilterOptions, NetworkStats};
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{EdgeId, NodeId, NodeKind};
