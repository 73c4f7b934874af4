//! Error types for the Redash API client.

use thiserror::Error;

/// Base error type for Redash operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Raised when a request cannot be sent, its body cannot be read, or the
/// service answers with a non-success status.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub status_code: Option<u16>,
    pub response_data: Option<serde_json::Value>,
}

impl TransportError {
    pub fn new(
        message: impl Into<String>,
        status_code: Option<u16>,
        response_data: Option<serde_json::Value>,
    ) -> Self {
        Self {
            message: message.into(),
            status_code,
            response_data,
        }
    }

    /// Failure before any status was received (connect, send, body read).
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(message, None, None)
    }
}
