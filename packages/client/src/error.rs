//! Error types for the document client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// HTTP API request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Reconnection attempts exhausted
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectExhausted(u32),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        Self::RequestFailed(e.to_string())
    }
}
