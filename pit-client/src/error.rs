//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (transport-level)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected envelope
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// HTTP 401 from the web app: deployment access is not configured
    /// (distinct from wrong credentials, which arrive as a rejected status)
    #[error("Web app access not configured")]
    Unauthorized,

    /// The store answered with `status: "error"` and a free-text message
    #[error("Rejected by store: {0}")]
    Rejected(String),

    /// Any other non-success HTTP status
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
