//! Error types for port operations.

use std::time::Duration;

/// Ledger storage errors.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization of a stored column failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

/// Transport failure from a generative backend.
///
/// Never surfaced to callers directly; the fallback controller treats every
/// variant as a failed trial and moves on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("backend call timed out after {0:?}")]
    Timeout(Duration),
    #[error("backend returned an empty response")]
    EmptyBody,
}

impl BackendError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum GeocodeError {
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),
}
