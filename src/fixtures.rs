//! Test fixtures and builders for domain model types
//!
//! Provides builder patterns for creating test data with sensible defaults.
//! Import via `use crate::fixtures::*` in test modules.

#![allow(dead_code)] // Builder methods are available for future tests

use chrono::{DateTime, Utc};
use serde_json::Map;

use crate::response::{
    Analysis, AnalysisStatus, Issue, Severity, SourceFormat, SourceLocation, SourceMap,
    SourceMapLocation, SourceType,
};

fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-11-03T10:21:15.784Z")
        .unwrap()
        .with_timezone(&Utc)
}

// ============================================================================
// AnalysisBuilder
// ============================================================================

/// Builder for creating test Analysis instances.
///
/// # Example
/// ```ignore
/// let analysis = AnalysisBuilder::new("job-123")
///     .status(AnalysisStatus::Queued)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisBuilder {
    uuid: String,
    status: AnalysisStatus,
    queue_time: u64,
    run_time: u64,
    client_tool_name: Option<String>,
    error: Option<String>,
}

impl AnalysisBuilder {
    /// Create a new builder with the given job UUID.
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            status: AnalysisStatus::Finished,
            queue_time: 88,
            run_time: 4096,
            client_tool_name: None,
            error: None,
        }
    }

    /// Set the job status.
    pub fn status(mut self, status: AnalysisStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the queue time in seconds.
    pub fn queue_time(mut self, seconds: u64) -> Self {
        self.queue_time = seconds;
        self
    }

    /// Set the run time in seconds.
    pub fn run_time(mut self, seconds: u64) -> Self {
        self.run_time = seconds;
        self
    }

    /// Set the submitting tool name.
    pub fn client_tool_name(mut self, name: impl Into<String>) -> Self {
        self.client_tool_name = Some(name.into());
        self
    }

    /// Set the error detail and flip the status to Error.
    pub fn error(mut self, detail: impl Into<String>) -> Self {
        self.error = Some(detail.into());
        self.status = AnalysisStatus::Error;
        self
    }

    /// Build the Analysis.
    pub fn build(self) -> Analysis {
        Analysis {
            uuid: self.uuid,
            api_version: "v2.4.0".to_string(),
            scanner_version: "0.13.6".to_string(),
            ruleset_version: "1.4.12".to_string(),
            queue_time: self.queue_time,
            run_time: self.run_time,
            status: self.status,
            submitted_at: fixed_timestamp(),
            submitted_by: "user-81".to_string(),
            client_tool_name: self.client_tool_name,
            error: self.error,
            info: None,
        }
    }
}

// ============================================================================
// IssueBuilder
// ============================================================================

/// Builder for creating test Issue instances.
#[derive(Debug, Clone)]
pub struct IssueBuilder {
    check_id: String,
    severity: Severity,
    locations: Vec<SourceLocation>,
}

impl IssueBuilder {
    /// Create a new builder with the given check ID.
    pub fn new(check_id: impl Into<String>) -> Self {
        Self {
            check_id: check_id.into(),
            severity: Severity::Low,
            locations: Vec::new(),
        }
    }

    /// Set the severity.
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Add a source location pointing at the given file.
    pub fn location(mut self, file: impl Into<String>, offset: u64, length: u64) -> Self {
        self.locations.push(SourceLocation {
            source_map: SourceMap {
                locations: vec![SourceMapLocation {
                    offset,
                    length,
                    file_id: 0,
                }],
            },
            source_type: SourceType::File,
            source_format: SourceFormat::Text,
            source_list: vec![file.into()],
        });
        self
    }

    /// Build the Issue.
    pub fn build(self) -> Issue {
        Issue {
            check_title: format!("Check {}", &self.check_id),
            description_short: "Something looks off.".to_string(),
            description_long: "A longer explanation of why this was flagged.".to_string(),
            check_id: self.check_id,
            severity: self.severity,
            locations: self.locations,
            decoded_locations: Vec::new(),
            extra: Map::new(),
        }
    }
}
