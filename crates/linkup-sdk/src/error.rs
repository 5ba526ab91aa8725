//! Error types for the LinkUp SDK

use thiserror::Error;

/// Errors that can occur when talking to a LinkUp server
#[derive(Error, Debug)]
pub enum LinkupError {
    /// The server answered with `success: false`
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The base URL could not be joined with an endpoint path
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl LinkupError {
    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            LinkupError::Api { status, .. } => Some(*status),
            LinkupError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type LinkupResult<T> = Result<T, LinkupError>;
