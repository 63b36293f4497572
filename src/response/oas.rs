//! OpenAPI document response model

use serde_json::{Value, json};

use crate::error::Result;
use crate::model::{ApiModel, pluck_str};

/// The platform's OpenAPI document, as raw text.
///
/// The endpoint serves YAML or HTML rather than JSON, so this model carries
/// the body verbatim and has no schema to validate against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OasResponse {
    pub data: String,
}

impl ApiModel for OasResponse {
    const NAME: &'static str = "OasResponse";

    fn from_dict(d: &Value) -> Result<Self> {
        Self::validate(d)?;
        Ok(Self {
            data: pluck_str(Self::NAME, d, &["data"])?.to_string(),
        })
    }

    fn to_dict(&self) -> Result<Value> {
        let d = json!({ "data": self.data });
        Self::validate(&d)?;
        Ok(d)
    }

    /// Wrap the response body as-is.
    ///
    /// The endpoint does not speak JSON, so unlike every other model this
    /// override never parses its input.
    fn from_json(s: &str) -> Result<Self> {
        Ok(Self {
            data: s.to_string(),
        })
    }
}
