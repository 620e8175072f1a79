//! Error types for the ALMA REST client.

use alma_core::kernel::ApiError;
use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// REST client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error (bad base URL, unreadable settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection refused, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response, with the backend's message when it sent one
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response shape)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<ClientError> for ApiError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Config(message) => ApiError::Config(message),
            ClientError::Network(message) => ApiError::Network(message),
            ClientError::Api { status, message } => ApiError::from_status(status, message),
            ClientError::Parse(message) => ApiError::Parse(message),
        }
    }
}
