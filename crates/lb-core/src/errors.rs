//! Cross-cutting error types for Lifeboat.
//!
//! Model loading and encoding errors live in `lb-model`; report and export
//! errors in `lb-report`. The binary converges everything into `anyhow`.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Errors that can be raised by the core domain types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A string or number did not name a known enum variant.
    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// A probability outside `[0, 1]` (or NaN) was handed to a result.
    #[error("Probability out of range: {0}")]
    ProbabilityOutOfRange(String),

    /// No history record with the requested ordinal.
    #[error("No history record #{0}")]
    RecordNotFound(usize),
}

/// One problem found while collecting a passenger form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every validation problem in a submitted form. Never empty.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("Invalid passenger input: {}", join_messages(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
