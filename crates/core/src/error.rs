//! Domain error model.

use thiserror::Error;

/// Result type used across the analytics layer.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Analytics-level error.
///
/// Only malformed top-level input is raised. Dirty individual records are
/// defaulted or skipped by the pipeline and never surface here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Top-level input failed validation (wrong type, missing or empty collection).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A record used a legacy or unknown field name instead of the canonical one.
    #[error("schema mismatch at {path}: field `{field}` is not accepted, expected `{expected}`")]
    SchemaMismatch {
        path: String,
        field: String,
        expected: String,
    },

    /// A single value passed to a helper had the wrong shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AnalyticsError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn schema_mismatch(
        path: impl Into<String>,
        field: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::SchemaMismatch {
            path: path.into(),
            field: field.into(),
            expected: expected.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
