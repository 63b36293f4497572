//! JSON Schema loading and validation support
//!
//! Every schema-bound model compiles its schema document exactly once into
//! a process-wide immutable [`Schema`]. Documents shipped with this crate
//! are embedded at compile time, resolved relative to the model source file
//! that binds them; [`resolve_schema`] offers the same sibling-directory
//! convention for schema sets stored on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jsonschema::Validator;
use serde_json::Value;

use crate::error::{SchemaError, ValidationError};

/// Directory holding schema documents next to the model sources
const SCHEMA_DIR: &str = "schemas";

/// A compiled, immutable JSON Schema document.
#[derive(Debug)]
pub struct Schema {
    validator: Validator,
}

impl Schema {
    /// Parse and compile a schema from JSON text.
    pub fn parse(source: &str) -> Result<Self, SchemaError> {
        let document: Value = serde_json::from_str(source).map_err(SchemaError::MalformedJson)?;
        Self::from_value(&document)
    }

    /// Compile a schema from an already-parsed document.
    pub fn from_value(document: &Value) -> Result<Self, SchemaError> {
        let validator = jsonschema::validator_for(document)
            .map_err(|err| SchemaError::InvalidDocument(err.to_string()))?;
        Ok(Self { validator })
    }

    /// Read, parse, and compile a schema file.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let source = fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => SchemaError::NotFound(path.to_path_buf()),
            _ => SchemaError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        })?;
        Self::parse(&source)
    }

    /// Whether a candidate value satisfies this schema.
    pub fn is_valid(&self, candidate: &Value) -> bool {
        self.validator.is_valid(candidate)
    }

    /// Validate a candidate, reporting the first violation under the given
    /// model name.
    pub(crate) fn check(
        &self,
        model: &'static str,
        candidate: &Value,
    ) -> Result<(), ValidationError> {
        self.validator
            .validate(candidate)
            .map_err(|err| ValidationError::new(model, &err))
    }
}

/// Compile a schema document embedded at build time.
///
/// Embedded documents are fixed when the crate is built, so a compile
/// failure here is a packaging defect and aborts at first use instead of
/// being deferred into every call site.
pub(crate) fn embedded(name: &str, source: &str) -> Schema {
    Schema::parse(source)
        .unwrap_or_else(|err| panic!("embedded schema {name} failed to compile: {err}"))
}

/// Resolve a schema file stored next to a model definition.
///
/// The file is looked up in the `schemas/` directory sibling to
/// `model_file`, so the result depends only on where the model lives, never
/// on the caller's working directory (pass an absolute model location for a
/// fully location-independent lookup). Returns [`SchemaError::NotFound`] if
/// no such file exists.
pub fn resolve_schema(
    model_file: impl AsRef<Path>,
    name: &str,
) -> Result<PathBuf, SchemaError> {
    let model_file = model_file.as_ref();
    let dir = model_file.parent().unwrap_or_else(|| Path::new("."));
    let path = dir.join(SCHEMA_DIR).join(name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(SchemaError::NotFound(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    const PAIR_SCHEMA: &str = r#"{
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "count": { "type": "integer", "minimum": 0 }
        },
        "required": ["name"]
    }"#;

    #[test]
    fn test_parse_and_validate() {
        let schema = Schema::parse(PAIR_SCHEMA).unwrap();
        assert!(schema.is_valid(&json!({"name": "a", "count": 3})));
        assert!(!schema.is_valid(&json!({"count": 3})));
    }

    #[test]
    fn test_check_reports_instance_path() {
        let schema = Schema::parse(PAIR_SCHEMA).unwrap();
        let err = schema
            .check("PairModel", &json!({"name": "a", "count": -1}))
            .unwrap_err();
        assert_eq!(err.model, "PairModel");
        assert!(err.instance_path.contains("count"));
        assert!(!err.detail.is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = Schema::parse("{ not json").unwrap_err();
        match err {
            SchemaError::MalformedJson(_) => (),
            other => panic!("Expected MalformedJson, got {other:?}"),
        }
    }

    #[test]
    fn test_from_value_rejects_invalid_document() {
        let err = Schema::from_value(&json!({"type": 12})).unwrap_err();
        match err {
            SchemaError::InvalidDocument(_) => (),
            other => panic!("Expected InvalidDocument, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_schema_next_to_model_file() {
        let dir = tempfile::tempdir().unwrap();
        let model_file = dir.path().join("widget.rs");
        fs::write(&model_file, "// model").unwrap();
        fs::create_dir(dir.path().join("schemas")).unwrap();
        fs::write(dir.path().join("schemas/widget.json"), PAIR_SCHEMA).unwrap();

        let resolved = resolve_schema(&model_file, "widget.json").unwrap();
        assert_eq!(resolved, dir.path().join("schemas/widget.json"));

        let schema = Schema::load(&resolved).unwrap();
        assert!(schema.is_valid(&json!({"name": "w"})));
    }

    #[test]
    fn test_resolve_schema_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let model_file = dir.path().join("widget.rs");
        fs::write(&model_file, "// model").unwrap();

        let err = resolve_schema(&model_file, "nope.json").unwrap_err();
        match err {
            SchemaError::NotFound(path) => {
                assert!(path.ends_with("schemas/nope.json"));
            }
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let err = Schema::load(Path::new("/definitely/not/here.json")).unwrap_err();
        match err {
            SchemaError::NotFound(_) => (),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }
}
