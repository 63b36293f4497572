//! Shared (de)serialization and validation contract for domain models
//!
//! [`ApiModel`] is the capability set every payload type implements:
//! `from_dict`/`to_dict` carry the explicit field mapping, while
//! `validate`, `from_json`, and `to_json` are provided on top of them.
//! Validation runs on both boundaries of an instance's lifetime: before
//! fields are extracted on the way in, and on the produced value on the
//! way out.

use log::warn;
use serde_json::{Map, Value};

use crate::error::{ModelError, Result};
use crate::schema::Schema;

/// Capability set shared by all request and response models.
pub trait ApiModel: Sized {
    /// Model name used in log and error output.
    const NAME: &'static str;

    /// Compiled schema bound to this model. `None` disables validation.
    fn schema() -> Option<&'static Schema> {
        None
    }

    /// Check a candidate value against the bound schema.
    ///
    /// A model without a schema is an explicit opt-out: the call succeeds,
    /// but a warning record naming the model is emitted so the skipped
    /// validation stays observable. The candidate is never mutated.
    fn validate(candidate: &Value) -> Result<()> {
        match Self::schema() {
            None => {
                warn!("cannot validate {} without a bound schema", Self::NAME);
                Ok(())
            }
            Some(schema) => Ok(schema.check(Self::NAME, candidate)?),
        }
    }

    /// Build the model from a parsed JSON value.
    ///
    /// Implementations validate the value before (or while) extracting
    /// fields; no partially populated instance escapes on any path.
    fn from_dict(d: &Value) -> Result<Self>;

    /// Serialize the model to a JSON value.
    ///
    /// Implementations validate the produced value before returning it, so
    /// an instance whose state would not satisfy its own schema fails here.
    fn to_dict(&self) -> Result<Value>;

    /// Parse a JSON string and build the model from it.
    ///
    /// Malformed text fails with [`ModelError::JsonParse`], distinct from
    /// any schema validation failure raised by `from_dict`.
    fn from_json(s: &str) -> Result<Self> {
        let parsed: Value = serde_json::from_str(s)?;
        Self::from_dict(&parsed)
    }

    /// Serialize the model to a JSON string.
    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_dict()?)?)
    }
}

/// Walk a nested key path, failing with `MissingKey` on the first absent
/// step. The reported path covers only the keys walked so far.
pub(crate) fn pluck<'a>(
    model: &'static str,
    value: &'a Value,
    path: &[&str],
) -> Result<&'a Value> {
    let mut cursor = value;
    for (depth, key) in path.iter().enumerate() {
        cursor = cursor.get(key).ok_or_else(|| ModelError::MissingKey {
            model,
            path: path[..=depth].join("."),
        })?;
    }
    Ok(cursor)
}

pub(crate) fn pluck_str<'a>(
    model: &'static str,
    value: &'a Value,
    path: &[&str],
) -> Result<&'a str> {
    typed(model, path, pluck(model, value, path)?.as_str(), "a string")
}

pub(crate) fn pluck_u64(model: &'static str, value: &Value, path: &[&str]) -> Result<u64> {
    typed(
        model,
        path,
        pluck(model, value, path)?.as_u64(),
        "an unsigned integer",
    )
}

pub(crate) fn pluck_array<'a>(
    model: &'static str,
    value: &'a Value,
    path: &[&str],
) -> Result<&'a Vec<Value>> {
    typed(model, path, pluck(model, value, path)?.as_array(), "an array")
}

pub(crate) fn pluck_object<'a>(
    model: &'static str,
    value: &'a Value,
    path: &[&str],
) -> Result<&'a Map<String, Value>> {
    typed(
        model,
        path,
        pluck(model, value, path)?.as_object(),
        "an object",
    )
}

/// Like [`pluck_str`], but absent or null values are `None` instead of an
/// error. A present value of the wrong type still fails.
pub(crate) fn pluck_opt_str<'a>(
    model: &'static str,
    value: &'a Value,
    path: &[&str],
) -> Result<Option<&'a str>> {
    match lookup(value, path) {
        None => Ok(None),
        Some(Value::Null) => Ok(None),
        Some(v) => typed(model, path, v.as_str(), "a string").map(Some),
    }
}

pub(crate) fn pluck_opt_u64(
    model: &'static str,
    value: &Value,
    path: &[&str],
) -> Result<Option<u64>> {
    match lookup(value, path) {
        None => Ok(None),
        Some(Value::Null) => Ok(None),
        Some(v) => typed(model, path, v.as_u64(), "an unsigned integer").map(Some),
    }
}

pub(crate) fn pluck_string_list(
    model: &'static str,
    value: &Value,
    path: &[&str],
) -> Result<Vec<String>> {
    pluck_array(model, value, path)?
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| ModelError::UnexpectedType {
                    model,
                    path: path.join("."),
                    expected: "an array of strings",
                })
        })
        .collect()
}

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cursor = value;
    for key in path {
        cursor = cursor.get(key)?;
    }
    Some(cursor)
}

fn typed<T>(
    model: &'static str,
    path: &[&str],
    value: Option<T>,
    expected: &'static str,
) -> Result<T> {
    value.ok_or_else(|| ModelError::UnexpectedType {
        model,
        path: path.join("."),
        expected,
    })
}
