//! Unified error types for the domain layer
//!
//! Catalog authoring mistakes and malformed value objects surface here.
//! Rule misses and probe misses are not errors; see `GenerationIssue`.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for catalog or value-object invariants.
    ///
    /// # Example
    /// ```ignore
    /// if keyword.trim().is_empty() {
    ///     return Err(DomainError::validation("rule keyword cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
