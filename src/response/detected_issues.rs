//! Response models for the detected-issues report endpoint

use std::sync::LazyLock;

use serde_json::{Map, Value, json};

use crate::error::{ModelError, Result};
use crate::model::{ApiModel, pluck_array, pluck_object, pluck_str, pluck_string_list};
use crate::response::issue::{Issue, SourceFormat, SourceType};
use crate::schema::{self, Schema};

static ISSUES_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    schema::embedded(
        "detected-issues.json",
        include_str!("schemas/detected-issues.json"),
    )
});

/// Findings of one analysis pass over one set of sources.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueReport {
    pub issues: Vec<Issue>,
    pub source_type: SourceType,
    pub source_format: SourceFormat,
    pub source_list: Vec<String>,

    /// Report-level metadata, passed through untouched
    pub meta: Map<String, Value>,
}

impl IssueReport {
    /// Whether this report contains an issue with the given check ID.
    pub fn contains_check(&self, check_id: &str) -> bool {
        self.issues.iter().any(|issue| issue.check_id == check_id)
    }
}

impl ApiModel for IssueReport {
    const NAME: &'static str = "IssueReport";

    fn from_dict(d: &Value) -> Result<Self> {
        Ok(Self {
            issues: pluck_array(Self::NAME, d, &["issues"])?
                .iter()
                .map(Issue::from_dict)
                .collect::<Result<Vec<_>>>()?,
            source_type: SourceType::parse(Self::NAME, pluck_str(Self::NAME, d, &["sourceType"])?)?,
            source_format: SourceFormat::parse(
                Self::NAME,
                pluck_str(Self::NAME, d, &["sourceFormat"])?,
            )?,
            source_list: pluck_string_list(Self::NAME, d, &["sourceList"])?,
            meta: pluck_object(Self::NAME, d, &["meta"])?.clone(),
        })
    }

    fn to_dict(&self) -> Result<Value> {
        let issues = self
            .issues
            .iter()
            .map(Issue::to_dict)
            .collect::<Result<Vec<_>>>()?;
        Ok(json!({
            "issues": issues,
            "sourceType": self.source_type.as_str(),
            "sourceFormat": self.source_format.as_str(),
            "sourceList": self.source_list,
            "meta": self.meta,
        }))
    }
}

/// The detected-issues report of a finished analysis.
///
/// The endpoint returns a bare array of reports; some callers hand the
/// payload over wrapped as `{"issueReports": [...]}` instead, and both
/// shapes are accepted. The schema always applies to the report array.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedIssuesResponse {
    pub reports: Vec<IssueReport>,
}

impl DetectedIssuesResponse {
    /// Total number of issues across all reports.
    pub fn issue_count(&self) -> usize {
        self.reports.iter().map(|report| report.issues.len()).sum()
    }

    /// Whether any report contains an issue with the given check ID.
    pub fn contains_check(&self, check_id: &str) -> bool {
        self.reports
            .iter()
            .any(|report| report.contains_check(check_id))
    }

    /// Iterate all issues across all reports.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.reports.iter().flat_map(|report| report.issues.iter())
    }
}

impl ApiModel for DetectedIssuesResponse {
    const NAME: &'static str = "DetectedIssuesResponse";

    fn schema() -> Option<&'static Schema> {
        Some(&ISSUES_SCHEMA)
    }

    fn from_dict(d: &Value) -> Result<Self> {
        let reports = match d {
            Value::Array(reports) => {
                Self::validate(d)?;
                reports
            }
            Value::Object(map) => match map.get("issueReports") {
                Some(inner) => {
                    Self::validate(inner)?;
                    inner.as_array().ok_or_else(|| ModelError::UnexpectedType {
                        model: Self::NAME,
                        path: "issueReports".to_string(),
                        expected: "an array of issue reports",
                    })?
                }
                None => {
                    return Err(ModelError::MissingKey {
                        model: Self::NAME,
                        path: "issueReports".to_string(),
                    });
                }
            },
            _ => {
                return Err(ModelError::UnexpectedType {
                    model: Self::NAME,
                    path: String::new(),
                    expected: "an array of issue reports or a wrapping object",
                });
            }
        };
        Ok(Self {
            reports: reports
                .iter()
                .map(IssueReport::from_dict)
                .collect::<Result<Vec<_>>>()?,
        })
    }

    fn to_dict(&self) -> Result<Value> {
        let reports = self
            .reports
            .iter()
            .map(IssueReport::to_dict)
            .collect::<Result<Vec<_>>>()?;
        let reports = Value::Array(reports);
        Self::validate(&reports)?;
        Ok(json!({ "issueReports": reports }))
    }

    /// Serialize back to the endpoint's wire form: the bare report array.
    fn to_json(&self) -> Result<String> {
        let d = self.to_dict()?;
        Ok(serde_json::to_string(&d["issueReports"])?)
    }
}
