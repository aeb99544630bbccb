//! JSON Schema for the model artifact.
//!
//! The schema is generated from [`ModelArtifact`] with `schemars` and enforced
//! with `jsonschema` before any typed deserialization happens, so a
//! serialization change on the producing side surfaces as a list of precise
//! schema errors instead of a single serde message.

use std::sync::LazyLock;

use schemars::schema_for;

use crate::artifact::ModelArtifact;
use crate::error::LoadError;

static ARTIFACT_SCHEMA: LazyLock<serde_json::Value> = LazyLock::new(|| {
    serde_json::to_value(schema_for!(ModelArtifact))
        .expect("schemars output is always serializable")
});

/// The model artifact JSON Schema (draft 2020-12).
#[must_use]
pub fn artifact_schema() -> &'static serde_json::Value {
    &ARTIFACT_SCHEMA
}

/// Validate a parsed artifact document against [`artifact_schema`].
///
/// # Errors
///
/// Returns `LoadError::Schema` with one message per violation.
pub fn validate_artifact(document: &serde_json::Value) -> Result<(), LoadError> {
    let validator = jsonschema::validator_for(artifact_schema()).map_err(|e| LoadError::Schema {
        errors: vec![format!("artifact schema failed to compile: {e}")],
    })?;

    let errors: Vec<String> = validator
        .iter_errors(document)
        .map(|e| {
            let path = e.instance_path.to_string();
            if path.is_empty() {
                format!("{e}")
            } else {
                format!("{path}: {e}")
            }
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(LoadError::Schema { errors })
    }
}
