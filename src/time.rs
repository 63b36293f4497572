//! Timestamp helpers for the millisecond-precision API wire format

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{ModelError, Result};

/// Parse an API timestamp such as `2019-05-29T17:41:46.902Z`.
pub(crate) fn parse_api_timestamp(
    model: &'static str,
    path: &str,
    raw: &str,
) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| ModelError::UnexpectedType {
            model,
            path: path.to_string(),
            expected: "an RFC 3339 timestamp",
        })
}

/// Format a timestamp the way the API emits it, millisecond precision.
pub(crate) fn format_api_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
