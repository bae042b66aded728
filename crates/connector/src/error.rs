//! Error types for the store connector

use thiserror::Error;

/// Errors that can occur while talking to the store API
///
/// All variants except `Init` are page-level: the extractor treats them
/// as retryable and they never escape the collection loop.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Failed to initialize the HTTP client
    #[error("failed to initialize store client: {0}")]
    Init(String),

    /// HTTP request failed (transport, timeout)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("unexpected HTTP status {status} for {resource} page {page}")]
    Status {
        status: u16,
        resource: String,
        page: u32,
    },

    /// Response body contained no JSON delimiter at all
    #[error("response for {resource} page {page} contained no JSON payload")]
    NoPayload { resource: String, page: u32 },

    /// JSON parsing failed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsed payload was valid JSON but not an array
    #[error("expected a JSON array for {resource} page {page}")]
    UnexpectedPayload { resource: String, page: u32 },
}
