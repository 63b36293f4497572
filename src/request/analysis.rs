//! Request models for submitting and inspecting analysis jobs

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};

use crate::error::{ModelError, Result};
use crate::model::{
    ApiModel, pluck_object, pluck_opt_str, pluck_opt_u64, pluck_str, pluck_string_list,
};
use crate::request::{HttpMethod, RequestModel};
use crate::schema::{self, Schema};
use crate::time::{format_api_timestamp, parse_api_timestamp};

static SUBMISSION_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    schema::embedded(
        "analysis-submission.json",
        include_str!("schemas/analysis-submission.json"),
    )
});

static LIST_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    schema::embedded(
        "analysis-list.json",
        include_str!("schemas/analysis-list.json"),
    )
});

static STATUS_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    schema::embedded(
        "analysis-status.json",
        include_str!("schemas/analysis-status.json"),
    )
});

/// How much work the platform should spend on a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalysisMode {
    #[default]
    Quick,
    Standard,
    Deep,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Quick => "quick",
            AnalysisMode::Standard => "standard",
            AnalysisMode::Deep => "deep",
        }
    }

    pub(crate) fn parse(model: &'static str, raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "quick" => Ok(AnalysisMode::Quick),
            "standard" => Ok(AnalysisMode::Standard),
            "deep" => Ok(AnalysisMode::Deep),
            _ => Err(ModelError::UnexpectedType {
                model,
                path: "data.analysisMode".to_string(),
                expected: "a known analysis mode",
            }),
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One source file of a submission payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// Source text
    pub source: String,

    /// Pre-parsed AST for the file, when the client supplies one
    pub ast: Option<Value>,
}

/// Request submitting sources for analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSubmissionRequest {
    /// Entry-point file of the submission, keyed into `sources`
    pub main_source: String,

    /// Source files by path
    pub sources: BTreeMap<String, SourceFile>,

    /// Paths in the order location file indexes refer to them
    pub source_list: Vec<String>,

    pub analysis_mode: AnalysisMode,

    /// Name of the submitting tool, if it wants to identify itself
    pub client_tool_name: Option<String>,
}

impl AnalysisSubmissionRequest {
    pub fn new(main_source: impl Into<String>) -> Self {
        Self {
            main_source: main_source.into(),
            sources: BTreeMap::new(),
            source_list: Vec::new(),
            analysis_mode: AnalysisMode::default(),
            client_tool_name: None,
        }
    }

    /// Add a source file to the submission.
    pub fn add_source(&mut self, path: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(
            path.into(),
            SourceFile {
                source: source.into(),
                ast: None,
            },
        );
    }
}

impl ApiModel for AnalysisSubmissionRequest {
    const NAME: &'static str = "AnalysisSubmissionRequest";

    fn schema() -> Option<&'static Schema> {
        Some(&SUBMISSION_SCHEMA)
    }

    fn from_dict(d: &Value) -> Result<Self> {
        Self::validate(d)?;
        let mut sources = BTreeMap::new();
        for (path, entry) in pluck_object(Self::NAME, d, &["data", "sources"])? {
            sources.insert(
                path.clone(),
                SourceFile {
                    source: pluck_str(Self::NAME, entry, &["source"])?.to_string(),
                    ast: match entry.get("ast") {
                        None | Some(Value::Null) => None,
                        Some(ast) => Some(ast.clone()),
                    },
                },
            );
        }
        let main_source = pluck_str(Self::NAME, d, &["data", "mainSource"])?;
        let source_list = match d["data"].get("sourceList") {
            None | Some(Value::Null) => Vec::new(),
            Some(_) => pluck_string_list(Self::NAME, d, &["data", "sourceList"])?,
        };
        Ok(Self {
            main_source: main_source.to_string(),
            sources,
            source_list,
            analysis_mode: AnalysisMode::parse(
                Self::NAME,
                pluck_str(Self::NAME, d, &["data", "analysisMode"])?,
            )?,
            client_tool_name: pluck_opt_str(Self::NAME, d, &["clientToolName"])?
                .map(str::to_string),
        })
    }

    fn to_dict(&self) -> Result<Value> {
        let mut sources = Map::new();
        for (path, file) in &self.sources {
            let mut entry = Map::new();
            entry.insert("source".to_string(), json!(file.source));
            if let Some(ast) = &file.ast {
                entry.insert("ast".to_string(), ast.clone());
            }
            sources.insert(path.clone(), Value::Object(entry));
        }
        let mut data = json!({
            "mainSource": self.main_source,
            "sources": sources,
            "analysisMode": self.analysis_mode.as_str(),
        });
        if !self.source_list.is_empty() {
            data["sourceList"] = json!(self.source_list);
        }
        let mut d = json!({ "data": data });
        if let Some(tool) = &self.client_tool_name {
            d["clientToolName"] = json!(tool);
        }
        Self::validate(&d)?;
        Ok(d)
    }
}

impl RequestModel for AnalysisSubmissionRequest {
    fn endpoint(&self) -> String {
        "v1/analyses".to_string()
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }
}

/// Request listing analysis jobs, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisListRequest {
    /// Offset into the result set
    pub offset: Option<u64>,

    /// Only jobs submitted at or after this instant
    pub date_from: Option<DateTime<Utc>>,

    /// Only jobs submitted before this instant
    pub date_to: Option<DateTime<Utc>>,
}

impl ApiModel for AnalysisListRequest {
    const NAME: &'static str = "AnalysisListRequest";

    fn schema() -> Option<&'static Schema> {
        Some(&LIST_SCHEMA)
    }

    fn from_dict(d: &Value) -> Result<Self> {
        Self::validate(d)?;
        let date_from = match pluck_opt_str(Self::NAME, d, &["dateFrom"])? {
            None => None,
            Some(raw) => Some(parse_api_timestamp(Self::NAME, "dateFrom", raw)?),
        };
        let date_to = match pluck_opt_str(Self::NAME, d, &["dateTo"])? {
            None => None,
            Some(raw) => Some(parse_api_timestamp(Self::NAME, "dateTo", raw)?),
        };
        Ok(Self {
            offset: pluck_opt_u64(Self::NAME, d, &["offset"])?,
            date_from,
            date_to,
        })
    }

    fn to_dict(&self) -> Result<Value> {
        let mut d = json!({});
        if let Some(offset) = self.offset {
            d["offset"] = json!(offset);
        }
        if let Some(from) = &self.date_from {
            d["dateFrom"] = json!(format_api_timestamp(from));
        }
        if let Some(to) = &self.date_to {
            d["dateTo"] = json!(format_api_timestamp(to));
        }
        Self::validate(&d)?;
        Ok(d)
    }
}

impl RequestModel for AnalysisListRequest {
    fn endpoint(&self) -> String {
        "v1/analyses".to_string()
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn parameters(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        if let Some(offset) = self.offset {
            params.insert("offset".to_string(), offset.to_string());
        }
        if let Some(from) = &self.date_from {
            params.insert("dateFrom".to_string(), format_api_timestamp(from));
        }
        if let Some(to) = &self.date_to {
            params.insert("dateTo".to_string(), format_api_timestamp(to));
        }
        params
    }

    fn payload(&self) -> Result<Value> {
        Ok(json!({}))
    }
}

/// Request for the current state of one analysis job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisStatusRequest {
    pub uuid: String,
}

impl AnalysisStatusRequest {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self { uuid: uuid.into() }
    }
}

impl ApiModel for AnalysisStatusRequest {
    const NAME: &'static str = "AnalysisStatusRequest";

    fn schema() -> Option<&'static Schema> {
        Some(&STATUS_SCHEMA)
    }

    fn from_dict(d: &Value) -> Result<Self> {
        Self::validate(d)?;
        Ok(Self {
            uuid: pluck_str(Self::NAME, d, &["uuid"])?.to_string(),
        })
    }

    fn to_dict(&self) -> Result<Value> {
        let d = json!({ "uuid": self.uuid });
        Self::validate(&d)?;
        Ok(d)
    }
}

impl RequestModel for AnalysisStatusRequest {
    fn endpoint(&self) -> String {
        format!("v1/analyses/{}", self.uuid)
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn payload(&self) -> Result<Value> {
        Ok(json!({}))
    }
}

/// Request for the originally submitted input of an analysis.
///
/// Shares the URL convention and schema binding of
/// [`AnalysisStatusRequest`], adding only the `/input` suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisInputRequest {
    status: AnalysisStatusRequest,
}

impl AnalysisInputRequest {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            status: AnalysisStatusRequest::new(uuid),
        }
    }

    pub fn uuid(&self) -> &str {
        &self.status.uuid
    }
}

impl ApiModel for AnalysisInputRequest {
    const NAME: &'static str = "AnalysisInputRequest";

    fn schema() -> Option<&'static Schema> {
        AnalysisStatusRequest::schema()
    }

    fn from_dict(d: &Value) -> Result<Self> {
        Ok(Self {
            status: AnalysisStatusRequest::from_dict(d)?,
        })
    }

    fn to_dict(&self) -> Result<Value> {
        self.status.to_dict()
    }
}

impl RequestModel for AnalysisInputRequest {
    fn endpoint(&self) -> String {
        format!("{}/input", self.status.endpoint())
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn payload(&self) -> Result<Value> {
        Ok(json!({}))
    }
}

/// Request for the detected-issues report of an analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedIssuesRequest {
    status: AnalysisStatusRequest,
}

impl DetectedIssuesRequest {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            status: AnalysisStatusRequest::new(uuid),
        }
    }

    pub fn uuid(&self) -> &str {
        &self.status.uuid
    }
}

impl ApiModel for DetectedIssuesRequest {
    const NAME: &'static str = "DetectedIssuesRequest";

    fn schema() -> Option<&'static Schema> {
        AnalysisStatusRequest::schema()
    }

    fn from_dict(d: &Value) -> Result<Self> {
        Ok(Self {
            status: AnalysisStatusRequest::from_dict(d)?,
        })
    }

    fn to_dict(&self) -> Result<Value> {
        self.status.to_dict()
    }
}

impl RequestModel for DetectedIssuesRequest {
    fn endpoint(&self) -> String {
        format!("{}/issues", self.status.endpoint())
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn payload(&self) -> Result<Value> {
        Ok(json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission_dict() -> Value {
        json!({
            "clientToolName": "argus-cli",
            "data": {
                "mainSource": "src/vault.rs",
                "sources": {
                    "src/vault.rs": { "source": "fn main() {}" }
                },
                "sourceList": ["src/vault.rs"],
                "analysisMode": "standard"
            }
        })
    }

    #[test]
    fn test_submission_round_trip() {
        let req = AnalysisSubmissionRequest::from_dict(&submission_dict()).unwrap();
        assert_eq!(req.main_source, "src/vault.rs");
        assert_eq!(req.analysis_mode, AnalysisMode::Standard);
        assert_eq!(req.to_dict().unwrap(), submission_dict());
    }

    #[test]
    fn test_submission_requires_main_source() {
        let mut d = submission_dict();
        d["data"].as_object_mut().unwrap().remove("mainSource");
        let err = AnalysisSubmissionRequest::from_dict(&d).unwrap_err();
        match err {
            ModelError::Validation(inner) => assert!(inner.detail.contains("mainSource")),
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_submission_builder_helpers() {
        let mut req = AnalysisSubmissionRequest::new("main.rs");
        req.add_source("main.rs", "fn main() {}");
        req.source_list = vec!["main.rs".to_string()];

        assert_eq!(req.endpoint(), "v1/analyses");
        assert_eq!(req.method(), HttpMethod::Post);
        assert_eq!(req.analysis_mode, AnalysisMode::Quick);

        let payload = req.payload().unwrap();
        assert_eq!(payload["data"]["sources"]["main.rs"]["source"], json!("fn main() {}"));
        assert!(payload.get("clientToolName").is_none());
    }

    #[test]
    fn test_list_request_parameters() {
        let req = AnalysisListRequest {
            offset: Some(40),
            date_from: Some(
                parse_api_timestamp("T", "dateFrom", "2025-10-01T00:00:00.000Z").unwrap(),
            ),
            date_to: None,
        };
        let params = req.parameters();
        assert_eq!(params["offset"], "40");
        assert_eq!(params["dateFrom"], "2025-10-01T00:00:00.000Z");
        assert!(!params.contains_key("dateTo"));
        assert_eq!(req.payload().unwrap(), json!({}));
    }

    #[test]
    fn test_list_request_round_trip() {
        let d = json!({"offset": 40, "dateFrom": "2025-10-01T00:00:00.000Z"});
        let req = AnalysisListRequest::from_dict(&d).unwrap();
        assert_eq!(req.to_dict().unwrap(), d);
    }

    #[test]
    fn test_empty_list_request() {
        let req = AnalysisListRequest::default();
        assert!(req.parameters().is_empty());
        assert_eq!(req.to_dict().unwrap(), json!({}));
    }

    #[test]
    fn test_status_request_endpoint() {
        let req = AnalysisStatusRequest::new("abc-123");
        assert_eq!(req.endpoint(), "v1/analyses/abc-123");
        assert_eq!(req.method(), HttpMethod::Get);
        assert_eq!(req.payload().unwrap(), json!({}));
    }

    #[test]
    fn test_input_request_extends_status_endpoint() {
        let req = AnalysisInputRequest::new("abc-123");
        assert_eq!(req.endpoint(), "v1/analyses/abc-123/input");
        assert_eq!(req.uuid(), "abc-123");
    }

    #[test]
    fn test_issues_request_extends_status_endpoint() {
        let req = DetectedIssuesRequest::new("abc-123");
        assert_eq!(req.endpoint(), "v1/analyses/abc-123/issues");
    }

    #[test]
    fn test_status_request_round_trip() {
        let req = AnalysisStatusRequest::from_dict(&json!({"uuid": "abc-123"})).unwrap();
        assert_eq!(req.to_dict().unwrap(), json!({"uuid": "abc-123"}));
    }

    #[test]
    fn test_status_request_rejects_empty_uuid() {
        let err = AnalysisStatusRequest::from_dict(&json!({"uuid": ""})).unwrap_err();
        match err {
            ModelError::Validation(_) => (),
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_input_request_shares_status_schema() {
        let err = AnalysisInputRequest::from_dict(&json!({})).unwrap_err();
        match err {
            ModelError::Validation(inner) => assert_eq!(inner.model, "AnalysisStatusRequest"),
            other => panic!("Expected Validation, got {other:?}"),
        }
    }
}
