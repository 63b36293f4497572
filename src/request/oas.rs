//! OpenAPI document request model

use std::fmt;

use serde_json::{Value, json};

use crate::error::Result;
use crate::model::ApiModel;
use crate::request::{HttpMethod, RequestModel};

/// Output format of the OpenAPI document endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OasFormat {
    #[default]
    Yaml,
    Html,
}

impl fmt::Display for OasFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OasFormat::Yaml => f.write_str("yaml"),
            OasFormat::Html => f.write_str("html"),
        }
    }
}

/// Request for the platform's OpenAPI document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OasRequest {
    pub format: OasFormat,
}

impl OasRequest {
    pub fn new(format: OasFormat) -> Self {
        Self { format }
    }
}

impl ApiModel for OasRequest {
    const NAME: &'static str = "OasRequest";

    /// The request carries no data, so deserialization cannot recover the
    /// format; it falls back to YAML.
    fn from_dict(d: &Value) -> Result<Self> {
        Self::validate(d)?;
        Ok(Self::default())
    }

    fn to_dict(&self) -> Result<Value> {
        let d = json!({});
        Self::validate(&d)?;
        Ok(d)
    }
}

impl RequestModel for OasRequest {
    fn endpoint(&self) -> String {
        match self.format {
            OasFormat::Yaml => "v1/openapi.yaml".to_string(),
            OasFormat::Html => "v1/openapi".to_string(),
        }
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }
}
