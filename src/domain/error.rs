//! Validation error shared by the chat and lead input pipelines.

use thiserror::Error;

/// Rejection of a single input field.
///
/// Carries the field name so the HTTP boundary can answer with per-field
/// detail instead of a blanket "bad request".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field '{field}': {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}

impl ValidationError {
    /// Creates an invalid field error.
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidField { field, .. } => field,
        }
    }
}
