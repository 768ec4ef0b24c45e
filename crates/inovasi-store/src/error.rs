//! Internal error types for PostgREST operations.
//!
//! These errors are internal to `inovasi-store` and are mapped to
//! `StoreError` at the port boundary.

use thiserror::Error;

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;

/// Errors talking to the PostgREST endpoint.
#[derive(Debug, Error)]
pub enum RestError {
    /// The endpoint answered with a non-success status.
    #[error("Request failed with status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// PostgREST `message` field, or the raw body
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("Invalid response from store: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error, including timeouts.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl RestError {
    /// Whether the request may succeed if sent again.
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Status { status, .. } => matches!(*status, 408 | 429 | 500..=599),
            Self::Network(_) => true,
            Self::InvalidResponse { .. } | Self::JsonParse(_) => false,
        }
    }
}
