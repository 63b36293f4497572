//! Error types for the Argus domain models

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Top-level error type for (de)serialization and validation
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Payload text was not syntactically valid JSON.
    #[error("malformed JSON payload: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Field extraction hit a key the bound schema should have guaranteed.
    #[error("{model}: missing key `{path}`")]
    MissingKey { model: &'static str, path: String },

    /// Field extraction found a value of an unexpected shape.
    #[error("{model}: expected {expected} at `{path}`")]
    UnexpectedType {
        model: &'static str,
        path: String,
        expected: &'static str,
    },
}

/// Errors while locating, reading, or compiling a schema document
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read schema file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("schema document is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("schema document is not a valid JSON Schema: {0}")]
    InvalidDocument(String),
}

/// A payload failed validation against a model's bound schema.
///
/// Carries the offending instance path and the violated constraint so the
/// caller can diagnose exactly which part of the payload was rejected.
#[derive(Debug, Error)]
#[error("{model} failed schema validation at `{instance_path}`: {detail}")]
pub struct ValidationError {
    /// Name of the model whose schema rejected the payload
    pub model: &'static str,

    /// JSON pointer to the offending part of the payload
    pub instance_path: String,

    /// JSON pointer to the violated schema constraint
    pub schema_path: String,

    /// Human-readable description of the violation
    pub detail: String,
}

impl ValidationError {
    pub(crate) fn new(model: &'static str, err: &jsonschema::ValidationError<'_>) -> Self {
        Self {
            model,
            instance_path: err.instance_path.to_string(),
            schema_path: err.schema_path.to_string(),
            detail: err.to_string(),
        }
    }
}
