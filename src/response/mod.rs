//! Response domain models for the Argus API
//!
//! One model per endpoint payload, each pairing a schema document from
//! `schemas/` with an explicit field mapping. Models are organized by
//! resource for easy discovery.

mod analysis;
mod auth;
mod detected_issues;
mod issue;
mod oas;
mod version;

pub use analysis::{
    Analysis, AnalysisListResponse, AnalysisStatus, AnalysisStatusResponse,
    AnalysisSubmissionResponse,
};
pub use auth::{AuthLoginResponse, AuthLogoutResponse, AuthRefreshResponse};
pub use detected_issues::{DetectedIssuesResponse, IssueReport};
pub use issue::{
    DecodedLocation, Issue, Severity, SourceFormat, SourceLocation, SourceMap, SourceMapLocation,
    SourceType,
};
pub use oas::OasResponse;
pub use version::VersionResponse;
