//! Core domain errors.

use thiserror::Error;

/// Core domain errors for luachat.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A message role name that is neither user nor assistant.
    #[error("Unknown message role: {0}")]
    UnknownRole(String),
}
