//! Shared handler state

use super::error::{ApiError, ApiResult};
use crate::config::{AnalysisConfig, ServerConfig};
use crate::dataset::load_network;
use crate::graph::GraphStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

/// State shared by all handlers.
///
/// Graphs are read-only once loaded, so handlers share them through `Arc`
/// without locking.
#[derive(Clone)]
pub struct AppState {
    network: Option<Arc<GraphStore>>,
    full_network: Arc<OnceCell<Arc<GraphStore>>>,
    full_data_path: PathBuf,
    analysis: AnalysisConfig,
}

impl AppState {
    /// State serving `network`; `None` when the data file could not be loaded
    pub fn new(network: Option<GraphStore>, config: &ServerConfig) -> Self {
        Self {
            network: network.map(Arc::new),
            full_network: Arc::new(OnceCell::new()),
            full_data_path: config.full_data_path.clone(),
            analysis: config.analysis.clone(),
        }
    }

    pub fn analysis(&self) -> &AnalysisConfig {
        &self.analysis
    }

    /// The default network
    pub fn network(&self) -> ApiResult<Arc<GraphStore>> {
        self.network
            .clone()
            .ok_or_else(|| ApiError::BadRequest("Network data not loaded".to_string()))
    }

    /// The full network, loaded from disk on first use
    pub async fn full_network(&self) -> ApiResult<Arc<GraphStore>> {
        if !self.full_data_path.exists() {
            return Err(ApiError::BadRequest("Full dataset not available".to_string()));
        }
        let path = self.full_data_path.clone();
        let store = self
            .full_network
            .get_or_try_init(|| async move {
                let store = tokio::task::spawn_blocking(move || load_network(&path))
                    .await?
                    .map_err(|e| ApiError::Internal(format!("Failed to load full dataset: {}", e)))?;
                info!(nodes = store.node_count(), edges = store.edge_count(), "Loaded full dataset");
                Ok::<_, ApiError>(Arc::new(store))
            })
            .await?;
        Ok(Arc::clone(store))
    }
}
