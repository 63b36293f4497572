//! Platform version request model

use serde_json::{Value, json};

use crate::error::Result;
use crate::model::ApiModel;
use crate::request::{HttpMethod, RequestModel};

/// Request for the platform's version report. Carries no data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionRequest;

impl ApiModel for VersionRequest {
    const NAME: &'static str = "VersionRequest";

    fn from_dict(d: &Value) -> Result<Self> {
        Self::validate(d)?;
        Ok(Self)
    }

    fn to_dict(&self) -> Result<Value> {
        let d = json!({});
        Self::validate(&d)?;
        Ok(d)
    }
}

impl RequestModel for VersionRequest {
    fn endpoint(&self) -> String {
        "v1/version".to_string()
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }
}
