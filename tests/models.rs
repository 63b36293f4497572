//! End-to-end (de)serialization tests over the public API

use serde_json::{Value, json};

use argus_models::request::{
    AnalysisInputRequest, AnalysisListRequest, AnalysisStatusRequest, AnalysisSubmissionRequest,
    AuthLoginRequest, DetectedIssuesRequest, OasFormat, OasRequest, VersionRequest,
};
use argus_models::response::{
    AnalysisListResponse, AnalysisStatus, AnalysisSubmissionResponse, AuthLoginResponse,
    DetectedIssuesResponse, Severity, VersionResponse,
};
use argus_models::{ApiModel, HttpMethod, ModelError, RequestModel};

fn login_dict() -> Value {
    json!({"jwtTokens": {"access": "a1", "refresh": "r1"}})
}

fn job_dict(uuid: &str) -> Value {
    json!({
        "uuid": uuid,
        "apiVersion": "v2.4.0",
        "scannerVersion": "0.13.6",
        "rulesetVersion": "1.4.12",
        "queueTime": 12,
        "runTime": 540,
        "status": "Finished",
        "submittedAt": "2025-11-03T10:21:15.784Z",
        "submittedBy": "user-81"
    })
}

#[test]
fn login_response_round_trips_exactly() {
    let resp = AuthLoginResponse::from_dict(&login_dict()).unwrap();
    assert_eq!(resp.access_token, "a1");
    assert_eq!(resp.refresh_token, "r1");
    assert_eq!(resp.to_dict().unwrap(), login_dict());

    let reparsed = AuthLoginResponse::from_json(&resp.to_json().unwrap()).unwrap();
    assert_eq!(reparsed, resp);
}

#[test]
fn login_response_missing_refresh_is_a_validation_error() {
    let err = AuthLoginResponse::from_dict(&json!({"jwtTokens": {"access": "a1"}})).unwrap_err();
    match err {
        ModelError::Validation(inner) => {
            assert_eq!(inner.model, "AuthLoginResponse");
            assert!(inner.detail.contains("refresh"));
        }
        other => panic!("Expected a validation error, got {other:?}"),
    }
}

#[test]
fn from_json_distinguishes_parse_errors_from_validation() {
    let parse_err = AuthLoginResponse::from_json("certainly not json").unwrap_err();
    assert!(matches!(parse_err, ModelError::JsonParse(_)));

    let validation_err = AuthLoginResponse::from_json("{}").unwrap_err();
    assert!(matches!(validation_err, ModelError::Validation(_)));
}

#[test]
fn analysis_input_request_builds_the_documented_endpoint() {
    let req = AnalysisInputRequest::new("abc-123");
    assert_eq!(req.endpoint(), "v1/analyses/abc-123/input");
    assert_eq!(req.method(), HttpMethod::Get);
    assert_eq!(req.payload().unwrap(), json!({}));
}

#[test]
fn request_family_shares_the_status_url_convention() {
    assert_eq!(
        AnalysisStatusRequest::new("abc-123").endpoint(),
        "v1/analyses/abc-123"
    );
    assert_eq!(
        DetectedIssuesRequest::new("abc-123").endpoint(),
        "v1/analyses/abc-123/issues"
    );
}

#[test]
fn submission_response_round_trips_through_json() {
    let resp = AnalysisSubmissionResponse::from_json(&job_dict("job-1").to_string()).unwrap();
    assert_eq!(resp.analysis.uuid, "job-1");
    assert_eq!(resp.analysis.status, AnalysisStatus::Finished);

    let reparsed =
        AnalysisSubmissionResponse::from_json(&resp.to_json().unwrap()).unwrap();
    assert_eq!(reparsed, resp);
}

#[test]
fn submission_response_rejects_empty_payload() {
    assert!(matches!(
        AnalysisSubmissionResponse::from_dict(&json!({})),
        Err(ModelError::Validation(_))
    ));
}

#[test]
fn list_response_maps_every_job() {
    let d = json!({
        "analyses": [job_dict("job-1"), job_dict("job-2")],
        "total": 44
    });
    let resp = AnalysisListResponse::from_dict(&d).unwrap();
    assert_eq!(resp.analyses.len(), 2);
    assert_eq!(resp.analyses[1].uuid, "job-2");
    assert_eq!(resp.total, 44);
    assert_eq!(resp.to_dict().unwrap(), d);
}

#[test]
fn detected_issues_accepts_both_wire_shapes() {
    let report = json!({
        "issues": [],
        "sourceType": "file",
        "sourceFormat": "text",
        "sourceList": ["src/lib.rs"],
        "meta": {}
    });

    let bare = DetectedIssuesResponse::from_dict(&json!([report])).unwrap();
    let wrapped =
        DetectedIssuesResponse::from_dict(&json!({"issueReports": [report]})).unwrap();
    assert_eq!(bare, wrapped);
    assert_eq!(bare.issue_count(), 0);
}

#[test]
fn detected_issues_severity_and_lookup() {
    let d = json!([{
        "issues": [{
            "checkId": "ARG-101",
            "checkTitle": "Hardcoded Credential",
            "description": {"head": "h", "tail": "t"},
            "severity": "High",
            "locations": [{
                "sourceMap": "0:4:0",
                "sourceType": "file",
                "sourceFormat": "text",
                "sourceList": ["src/lib.rs"]
            }],
            "extra": {}
        }],
        "sourceType": "file",
        "sourceFormat": "text",
        "sourceList": ["src/lib.rs"],
        "meta": {}
    }]);
    let resp = DetectedIssuesResponse::from_dict(&d).unwrap();
    assert!(resp.contains_check("ARG-101"));
    let severities: Vec<Severity> = resp.iter().map(|issue| issue.severity).collect();
    assert_eq!(severities, vec![Severity::High]);
}

#[test]
fn submission_request_payload_is_schema_clean() {
    let mut req = AnalysisSubmissionRequest::new("src/vault.rs");
    req.add_source("src/vault.rs", "fn main() {}");
    req.client_tool_name = Some("argus-cli".to_string());

    let payload = req.payload().unwrap();
    assert_eq!(payload["data"]["mainSource"], json!("src/vault.rs"));
    assert_eq!(payload["clientToolName"], json!("argus-cli"));

    let reparsed = AnalysisSubmissionRequest::from_dict(&payload).unwrap();
    assert_eq!(reparsed, req);
}

#[test]
fn login_request_self_check_catches_blank_credentials() {
    let err = AuthLoginRequest::new("auditor", "").to_json().unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
}

#[test]
fn list_request_turns_filters_into_query_parameters() {
    let req = AnalysisListRequest {
        offset: Some(100),
        ..Default::default()
    };
    assert_eq!(req.endpoint(), "v1/analyses");
    assert_eq!(req.parameters()["offset"], "100");
}

#[test]
fn version_round_trip_and_request_shape() {
    assert_eq!(VersionRequest.endpoint(), "v1/version");

    let d = json!({
        "api": "v2.4.0",
        "scanner": "0.13.6",
        "ruleset": "1.4.12",
        "hash": "6f8f29dca2f4"
    });
    let resp = VersionResponse::from_dict(&d).unwrap();
    assert_eq!(VersionResponse::from_json(&resp.to_json().unwrap()).unwrap(), resp);
}

#[test]
fn oas_request_format_selects_the_endpoint() {
    assert_eq!(OasRequest::new(OasFormat::Yaml).endpoint(), "v1/openapi.yaml");
    assert_eq!(OasRequest::new(OasFormat::Html).endpoint(), "v1/openapi");
}

#[test]
fn validation_failure_never_yields_an_instance() {
    // A failed from_dict returns only the error; there is no partially
    // populated value to observe on the Err path.
    let result = AuthLoginResponse::from_dict(&json!({"jwtTokens": {}}));
    assert!(result.is_err());
}
