//! Error types for the query crate.

use thiserror::Error;

/// Errors that can occur when loading feature collections or configuring
/// the engine.
///
/// Query text itself never produces an error: malformed queries degrade to
/// predicates that match nothing.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The input handed over as a feature collection is not one.
    #[error("expected a feature collection (JSON array), found {found}")]
    NotACollection { found: &'static str },

    /// A literal pattern could not be compiled.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Filter options failed validation.
    #[error("invalid filter options: {0}")]
    InvalidOptions(String),
}

impl QueryError {
    /// Create an options validation error.
    pub fn options(msg: impl Into<String>) -> Self {
        Self::InvalidOptions(msg.into())
    }
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
