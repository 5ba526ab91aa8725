//! Dataset loading and preparation
//!
//! Two input formats feed the graph store:
//! - the network JSON document written by `linkup prepare` (and by the
//!   older preparation scripts), see [`document`]
//! - the raw Crunchbase-style CSV exports, sampled into a network by
//!   [`DatasetBuilder`]

pub mod builder;
pub mod csv;
pub mod document;

pub use builder::{prune_by_degree, DatasetBuilder};
pub use document::{load_network, save_network, EdgeRecord, NetworkDocument, NodeRecord, RoundRecord};

use crate::graph::GraphError;
use thiserror::Error;

/// Errors raised while reading or writing datasets
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type DatasetResult<T> = Result<T, DatasetError>;
