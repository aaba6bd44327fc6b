//! Error types for the content API client.

use thiserror::Error;

/// Result type for API client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Generic message used when the server does not explain a failure.
pub const GENERIC_FAILURE: &str = "The request could not be completed. Please try again.";

/// API client errors.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Configuration error (missing or malformed base URL)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection refused, DNS, broken stream)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response. `message` is the server's text when it supplied one.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response shape)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable text suitable for an alert.
    pub fn message(&self) -> String {
        match self {
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Network(_) => GENERIC_FAILURE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}
