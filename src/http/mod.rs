//! HTTP API for the investment network
//!
//! axum router with permissive CORS, request tracing and the embedded
//! explorer pages.

pub mod error;
pub mod handler;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use server::{router, HttpServer};
pub use state::AppState;
