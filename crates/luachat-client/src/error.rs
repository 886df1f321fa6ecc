//! Error types for the chat client.

use reqwest::StatusCode;
use thiserror::Error;

use luachat_core::CoreError;

/// Errors that can occur when talking to the chat API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: the request never reached the server or the
    /// response never arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {path}")]
    Status { status: StatusCode, path: String },

    /// The configured base address is not a usable URL.
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        ClientError::Serialization(err.to_string())
    }
}
