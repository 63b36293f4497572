//! Platform version response model

use std::sync::LazyLock;

use serde_json::{Value, json};

use crate::error::Result;
use crate::model::{ApiModel, pluck_str};
use crate::schema::{self, Schema};

static VERSION_SCHEMA: LazyLock<Schema> =
    LazyLock::new(|| schema::embedded("version.json", include_str!("schemas/version.json")));

/// Version report of the API and its analysis backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionResponse {
    /// API version
    pub api: String,

    /// Scan engine version
    pub scanner: String,

    /// Rule set version
    pub ruleset: String,

    /// Build hash identifying the deployed platform
    pub hash: String,
}

impl ApiModel for VersionResponse {
    const NAME: &'static str = "VersionResponse";

    fn schema() -> Option<&'static Schema> {
        Some(&VERSION_SCHEMA)
    }

    fn from_dict(d: &Value) -> Result<Self> {
        Self::validate(d)?;
        Ok(Self {
            api: pluck_str(Self::NAME, d, &["api"])?.to_string(),
            scanner: pluck_str(Self::NAME, d, &["scanner"])?.to_string(),
            ruleset: pluck_str(Self::NAME, d, &["ruleset"])?.to_string(),
            hash: pluck_str(Self::NAME, d, &["hash"])?.to_string(),
        })
    }

    fn to_dict(&self) -> Result<Value> {
        let d = json!({
            "api": self.api,
            "scanner": self.scanner,
            "ruleset": self.ruleset,
            "hash": self.hash,
        });
        Self::validate(&d)?;
        Ok(d)
    }
}
