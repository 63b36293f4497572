//! Response models for analysis jobs

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use crate::error::{ModelError, Result};
use crate::model::{ApiModel, pluck_array, pluck_opt_str, pluck_opt_u64, pluck_str, pluck_u64};
use crate::schema::{self, Schema};
use crate::time::{format_api_timestamp, parse_api_timestamp};

static SUBMISSION_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    schema::embedded(
        "analysis-submission.json",
        include_str!("schemas/analysis-submission.json"),
    )
});

static STATUS_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    schema::embedded(
        "analysis-status.json",
        include_str!("schemas/analysis-status.json"),
    )
});

static LIST_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    schema::embedded(
        "analysis-list.json",
        include_str!("schemas/analysis-list.json"),
    )
});

/// Lifecycle states of an analysis job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStatus {
    Queued,
    InProgress,
    Error,
    Finished,
}

impl AnalysisStatus {
    /// Canonical wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Queued => "Queued",
            AnalysisStatus::InProgress => "In Progress",
            AnalysisStatus::Error => "Error",
            AnalysisStatus::Finished => "Finished",
        }
    }

    /// Parse the wire spelling, tolerating case differences.
    pub(crate) fn parse(model: &'static str, raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "queued" => Ok(AnalysisStatus::Queued),
            "in progress" => Ok(AnalysisStatus::InProgress),
            "error" => Ok(AnalysisStatus::Error),
            "finished" => Ok(AnalysisStatus::Finished),
            _ => Err(ModelError::UnexpectedType {
                model,
                path: "status".to_string(),
                expected: "a known analysis status",
            }),
        }
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An analysis job as reported by the API.
///
/// Several responses carry the same job object, so this model deserializes
/// recursively from each of them instead of binding a schema of its own;
/// the enclosing response validates the payload on both boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Job UUID
    pub uuid: String,

    /// Version of the API that accepted the job
    pub api_version: String,

    /// Version of the scan engine assigned to the job
    pub scanner_version: String,

    /// Version of the rule set the job was checked against
    pub ruleset_version: String,

    /// Seconds the job spent queued
    pub queue_time: u64,

    /// Seconds the job spent running, zero while queued
    pub run_time: u64,

    /// Current lifecycle state
    pub status: AnalysisStatus,

    /// When the job was submitted
    pub submitted_at: DateTime<Utc>,

    /// Identifier of the submitting user
    pub submitted_by: String,

    /// Client tool that submitted the job, if reported
    pub client_tool_name: Option<String>,

    /// Error detail for failed jobs
    pub error: Option<String>,

    /// Informational detail attached by the platform
    pub info: Option<String>,
}

impl ApiModel for Analysis {
    const NAME: &'static str = "Analysis";

    fn from_dict(d: &Value) -> Result<Self> {
        Ok(Self {
            uuid: pluck_str(Self::NAME, d, &["uuid"])?.to_string(),
            api_version: pluck_str(Self::NAME, d, &["apiVersion"])?.to_string(),
            scanner_version: pluck_str(Self::NAME, d, &["scannerVersion"])?.to_string(),
            ruleset_version: pluck_str(Self::NAME, d, &["rulesetVersion"])?.to_string(),
            queue_time: pluck_u64(Self::NAME, d, &["queueTime"])?,
            run_time: pluck_opt_u64(Self::NAME, d, &["runTime"])?.unwrap_or(0),
            status: AnalysisStatus::parse(Self::NAME, pluck_str(Self::NAME, d, &["status"])?)?,
            submitted_at: parse_api_timestamp(
                Self::NAME,
                "submittedAt",
                pluck_str(Self::NAME, d, &["submittedAt"])?,
            )?,
            submitted_by: pluck_str(Self::NAME, d, &["submittedBy"])?.to_string(),
            client_tool_name: pluck_opt_str(Self::NAME, d, &["clientToolName"])?
                .map(str::to_string),
            error: pluck_opt_str(Self::NAME, d, &["error"])?.map(str::to_string),
            info: pluck_opt_str(Self::NAME, d, &["info"])?.map(str::to_string),
        })
    }

    fn to_dict(&self) -> Result<Value> {
        let mut d = json!({
            "uuid": self.uuid,
            "apiVersion": self.api_version,
            "scannerVersion": self.scanner_version,
            "rulesetVersion": self.ruleset_version,
            "queueTime": self.queue_time,
            "runTime": self.run_time,
            "status": self.status.as_str(),
            "submittedAt": format_api_timestamp(&self.submitted_at),
            "submittedBy": self.submitted_by,
        });
        if let Some(tool) = &self.client_tool_name {
            d["clientToolName"] = json!(tool);
        }
        if let Some(error) = &self.error {
            d["error"] = json!(error);
        }
        if let Some(info) = &self.info {
            d["info"] = json!(info);
        }
        Ok(d)
    }
}

/// Response to a successful analysis submission.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSubmissionResponse {
    pub analysis: Analysis,
}

impl ApiModel for AnalysisSubmissionResponse {
    const NAME: &'static str = "AnalysisSubmissionResponse";

    fn schema() -> Option<&'static Schema> {
        Some(&SUBMISSION_SCHEMA)
    }

    fn from_dict(d: &Value) -> Result<Self> {
        Self::validate(d)?;
        Ok(Self {
            analysis: Analysis::from_dict(d)?,
        })
    }

    fn to_dict(&self) -> Result<Value> {
        let d = self.analysis.to_dict()?;
        Self::validate(&d)?;
        Ok(d)
    }
}

/// Response to an analysis status poll.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisStatusResponse {
    pub analysis: Analysis,
}

impl ApiModel for AnalysisStatusResponse {
    const NAME: &'static str = "AnalysisStatusResponse";

    fn schema() -> Option<&'static Schema> {
        Some(&STATUS_SCHEMA)
    }

    fn from_dict(d: &Value) -> Result<Self> {
        Self::validate(d)?;
        Ok(Self {
            analysis: Analysis::from_dict(d)?,
        })
    }

    fn to_dict(&self) -> Result<Value> {
        let d = self.analysis.to_dict()?;
        Self::validate(&d)?;
        Ok(d)
    }
}

/// One page of the analysis job listing.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisListResponse {
    /// Jobs on this page
    pub analyses: Vec<Analysis>,

    /// Total number of jobs matching the listing filters
    pub total: u64,
}

impl ApiModel for AnalysisListResponse {
    const NAME: &'static str = "AnalysisListResponse";

    fn schema() -> Option<&'static Schema> {
        Some(&LIST_SCHEMA)
    }

    fn from_dict(d: &Value) -> Result<Self> {
        Self::validate(d)?;
        let analyses = pluck_array(Self::NAME, d, &["analyses"])?
            .iter()
            .map(Analysis::from_dict)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            analyses,
            total: pluck_u64(Self::NAME, d, &["total"])?,
        })
    }

    fn to_dict(&self) -> Result<Value> {
        let analyses = self
            .analyses
            .iter()
            .map(Analysis::to_dict)
            .collect::<Result<Vec<_>>>()?;
        let d = json!({
            "analyses": analyses,
            "total": self.total,
        });
        Self::validate(&d)?;
        Ok(d)
    }
}
