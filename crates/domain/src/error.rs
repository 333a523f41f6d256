//! Unified error types for the domain layer
//!
//! Request values are validated on construction; anything that fails here is
//! rejected before the engine spends a backend call on it.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed (e.g., missing or out-of-range field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Parse error (unknown enumeration tag and similar)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for a missing or malformed request field.
    ///
    /// # Example
    /// ```ignore
    /// if cuisine.trim().is_empty() {
    ///     return Err(DomainError::validation("cuisine is required"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Used by the `FromStr` implementations of the itinerary tag enums when
    /// the input does not match any known tag.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
