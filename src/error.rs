//! Error types for the Hyperliquid info client

use std::sync::Arc;

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the Hyperliquid info client
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response
    #[error("API error: {0}")]
    Api(String),

    /// Invalid parameter error
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Loading the symbol catalog failed.
    ///
    /// Every caller waiting on the same load receives a clone of the same `Arc`.
    #[error("Metadata fetch error: {0}")]
    MetadataFetch(Arc<Error>),
}

impl Error {
    /// The underlying error of a failed symbol catalog load, if this is one
    pub fn metadata_source(&self) -> Option<&Arc<Error>> {
        match self {
            Error::MetadataFetch(inner) => Some(inner),
            _ => None,
        }
    }
}
