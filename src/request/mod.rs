//! Request domain models for the Argus API
//!
//! A request model is a pure description of one API call: the transport
//! layer composes [`RequestModel::endpoint`] with its base host, sends
//! [`RequestModel::payload`] using [`RequestModel::method`], and appends
//! [`RequestModel::parameters`] to the query string. Everything here is
//! deterministic and free of side effects.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::error::Result;
use crate::model::ApiModel;

mod analysis;
mod auth;
mod oas;
mod version;

pub use analysis::{
    AnalysisInputRequest, AnalysisListRequest, AnalysisMode, AnalysisStatusRequest,
    AnalysisSubmissionRequest, DetectedIssuesRequest, SourceFile,
};
pub use auth::{AuthLoginRequest, AuthLogoutRequest, AuthRefreshRequest};
pub use oas::{OasFormat, OasRequest};
pub use version::VersionRequest;

/// HTTP method a request model expects the transport to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract for outbound request models.
pub trait RequestModel: ApiModel {
    /// Relative URL path for this request, without scheme or host.
    fn endpoint(&self) -> String;

    /// HTTP method to perform.
    fn method(&self) -> HttpMethod;

    /// URL query parameters. Empty unless overridden.
    fn parameters(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    /// Additional request headers. Empty unless overridden.
    fn headers(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    /// Body payload to submit. Defaults to the serialized model.
    fn payload(&self) -> Result<Value> {
        self.to_dict()
    }
}
