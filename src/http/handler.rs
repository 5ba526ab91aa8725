//! HTTP handlers for the network API
//!
//! Every response carries `success`; payloads sit under `data`.
//! Analysis runs on the blocking pool so large graphs do not stall the
//! runtime.

use super::error::{ApiError, ApiResult};
use super::state::AppState;
use crate::analysis::{
    build_report, compute_centrality, detect_communities, export_network, find_pathways, node_details,
    search_nodes, AnalysisError, CommunityMethod, FilteredNetwork, FilteredStats, NetworkFilter, PathwayRequest,
};
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use tokio::task::spawn_blocking;
use tracing::debug;

/// Success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { success: true, data })
}

/// Parse an optional JSON body; an empty body gives the default value
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> ApiResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "success": true, "message": "Backend API is running" }))
}

/// Query string of `GET /api/network`
#[derive(Debug, Default, Deserialize)]
pub struct NetworkQuery {
    pub dataset: Option<String>,
    #[serde(flatten)]
    pub filter: NetworkFilter,
}

pub async fn network(State(state): State<AppState>, Query(query): Query<NetworkQuery>) -> ApiResult<impl IntoResponse> {
    let store = match query.dataset.as_deref() {
        Some("full") => state.full_network().await?,
        _ => state.network()?,
    };
    let filter = query.filter;
    let network = spawn_blocking(move || filter.apply(&store)).await?;
    Ok(ok(network))
}

pub async fn network_stats(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let store = state.network()?;
    Ok(ok(store.statistics()))
}

pub async fn filters(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let store = state.network()?;
    Ok(ok(store.filter_options()))
}

#[derive(Debug, Serialize)]
pub struct FilterResponse {
    #[serde(flatten)]
    pub network: FilteredNetwork,
    pub stats: FilteredStats,
}

pub async fn filter_network(State(state): State<AppState>, body: Bytes) -> ApiResult<impl IntoResponse> {
    let filter: NetworkFilter = parse_body(&body)?;
    let store = state.network()?;
    let network = spawn_blocking(move || filter.apply(&store)).await?;
    let stats = network.stats();
    Ok(ok(FilterResponse { network, stats }))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

pub async fn search(State(state): State<AppState>, Query(query): Query<SearchQuery>) -> ApiResult<impl IntoResponse> {
    let store = state.network()?;
    let limit = query.limit.unwrap_or(state.analysis().search_limit);
    let results = search_nodes(&store, &query.q, limit);
    debug!(query = %query.q, results = results.len(), "Search");
    Ok(ok(results))
}

pub async fn node(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    let store = state.network()?;
    Ok(ok(node_details(&store, &id)?))
}

#[derive(Debug, Default, Deserialize)]
pub struct CentralityRequest {
    pub limit: Option<usize>,
}

pub async fn centrality(State(state): State<AppState>, body: Bytes) -> ApiResult<impl IntoResponse> {
    let request: CentralityRequest = parse_body(&body)?;
    let store = state.network()?;
    let limit = request.limit.unwrap_or(state.analysis().top_nodes);
    let report = spawn_blocking(move || compute_centrality(&store, limit)).await?;
    Ok(ok(report))
}

#[derive(Debug, Default, Deserialize)]
pub struct CommunityRequest {
    pub method: Option<String>,
}

pub async fn communities(State(state): State<AppState>, body: Bytes) -> ApiResult<impl IntoResponse> {
    let request: CommunityRequest = parse_body(&body)?;
    let method = match request.method.as_deref() {
        Some(m) => CommunityMethod::from_str(m).map_err(AnalysisError::InvalidParameter)?,
        None => CommunityMethod::default(),
    };
    let store = state.network()?;
    let report = spawn_blocking(move || detect_communities(&store, method)).await?;
    Ok(ok(report))
}

pub async fn pathways(State(state): State<AppState>, body: Bytes) -> ApiResult<impl IntoResponse> {
    let request: PathwayRequest = parse_body(&body)?;
    let store = state.network()?;
    // Reject missing endpoints and oversized depths before doing any work
    request.endpoints()?;
    let limits = state.analysis().pathway_limits();
    limits.depth_for(&request)?;

    let report = spawn_blocking(move || find_pathways(&store, &request, limits)).await??;
    Ok(ok(report))
}

pub async fn report(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let store = state.network()?;
    let report = spawn_blocking(move || build_report(&store)).await?;
    Ok(ok(report))
}

pub async fn export(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let store = state.network()?;
    let top_nodes = state.analysis().top_nodes;
    let document = spawn_blocking(move || export_network(&store, top_nodes)).await?;
    Ok(ok(document))
}

pub async fn api_not_found() -> ApiError {
    ApiError::NotFound("API endpoint not found".to_string())
}
