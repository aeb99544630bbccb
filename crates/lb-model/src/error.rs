//! Model error types.

use std::path::PathBuf;

use lb_core::errors::CoreError;
use thiserror::Error;

use crate::artifact::CategoricalField;

/// Errors from loading a model artifact. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The artifact file does not exist.
    #[error("Model artifact not found: {}", path.display())]
    Missing { path: PathBuf },

    /// The artifact exists but could not be read.
    #[error("Failed to read model artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not parseable JSON.
    #[error("Model artifact {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The artifact was written for a different format version.
    #[error("Model artifact format version {found} is not supported (expected {supported})")]
    IncompatibleVersion { found: String, supported: u32 },

    /// The artifact does not match the artifact JSON Schema.
    #[error("Model artifact failed schema validation: {}", .errors.join("; "))]
    Schema { errors: Vec<String> },

    /// The artifact is well-formed but internally inconsistent.
    #[error("Invalid model artifact: {0}")]
    Invalid(String),
}

/// Errors from mapping passenger input to a feature vector.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// The input carries a category the model was not trained on.
    #[error("Unknown {field} '{value}' for this model (expected one of: {})", .expected.join(", "))]
    UnknownCategory {
        field: CategoricalField,
        value: String,
        expected: Vec<String>,
    },
}

/// Errors from invoking the classifier. These indicate a programming error
/// and are not recovered from.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// Feature vector length differs from what the classifier expects.
    #[error("Feature vector has {found} values but the model expects {expected}")]
    ShapeMismatch { expected: usize, found: usize },

    /// The classifier produced a probability outside `[0, 1]`.
    #[error(transparent)]
    InvalidOutput(#[from] CoreError),
}

/// Failure of a full encode + predict interaction.
#[derive(Debug, Error)]
pub enum PredictError {
    /// Recoverable: report it and let the user correct the input.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Fatal.
    #[error(transparent)]
    Model(#[from] ModelError),
}
