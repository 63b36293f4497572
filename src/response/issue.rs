//! Domain models for individual detected issues
//!
//! These types are sub-models: they never bind a schema of their own and
//! deserialize recursively from [`DetectedIssuesResponse`], which validates
//! the whole report payload before extraction starts.
//!
//! [`DetectedIssuesResponse`]: crate::response::DetectedIssuesResponse

use std::fmt;

use serde_json::{Map, Value, json};

use crate::error::{ModelError, Result};
use crate::model::{
    ApiModel, pluck_array, pluck_object, pluck_opt_str, pluck_str, pluck_string_list, pluck_u64,
};

/// Severity of a reported issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Unknown,
    None,
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Unknown => "Unknown",
            Severity::None => "None",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }

    pub(crate) fn parse(model: &'static str, raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "unknown" => Ok(Severity::Unknown),
            "none" => Ok(Severity::None),
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            _ => Err(ModelError::UnexpectedType {
                model,
                path: "severity".to_string(),
                expected: "a known severity",
            }),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of source artifact a finding refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Snippet,
    File,
    Archive,
    Repository,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Snippet => "snippet",
            SourceType::File => "file",
            SourceType::Archive => "archive",
            SourceType::Repository => "repository",
        }
    }

    pub(crate) fn parse(model: &'static str, raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "snippet" => Ok(SourceType::Snippet),
            "file" => Ok(SourceType::File),
            "archive" => Ok(SourceType::Archive),
            "repository" => Ok(SourceType::Repository),
            _ => Err(ModelError::UnexpectedType {
                model,
                path: "sourceType".to_string(),
                expected: "a known source type",
            }),
        }
    }
}

/// Representation format of the analyzed sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Text,
    AstJson,
    Binary,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Text => "text",
            SourceFormat::AstJson => "ast-json",
            SourceFormat::Binary => "binary",
        }
    }

    pub(crate) fn parse(model: &'static str, raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "text" => Ok(SourceFormat::Text),
            "ast-json" => Ok(SourceFormat::AstJson),
            "binary" => Ok(SourceFormat::Binary),
            _ => Err(ModelError::UnexpectedType {
                model,
                path: "sourceFormat".to_string(),
                expected: "a known source format",
            }),
        }
    }
}

/// One `offset:length:file` entry of a compressed source map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMapLocation {
    /// Byte offset into the referenced source
    pub offset: u64,

    /// Length of the referenced range in bytes
    pub length: u64,

    /// Index into the enclosing source list; -1 when no file applies
    pub file_id: i64,
}

/// A compressed source map: `;`-separated `offset:length:file` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMap {
    pub locations: Vec<SourceMapLocation>,
}

impl SourceMap {
    /// Parse the compressed wire form. Empty entries are skipped.
    pub fn parse(model: &'static str, raw: &str) -> Result<Self> {
        let mut locations = Vec::new();
        for entry in raw.split(';').filter(|entry| !entry.is_empty()) {
            locations.push(Self::parse_entry(model, entry)?);
        }
        Ok(Self { locations })
    }

    fn parse_entry(model: &'static str, entry: &str) -> Result<SourceMapLocation> {
        let bad_entry = || ModelError::UnexpectedType {
            model,
            path: "sourceMap".to_string(),
            expected: "an offset:length:file source map entry",
        };
        let mut parts = entry.split(':');
        let offset = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad_entry)?;
        let length = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad_entry)?;
        let file_id = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad_entry)?;
        if parts.next().is_some() {
            return Err(bad_entry());
        }
        Ok(SourceMapLocation {
            offset,
            length,
            file_id,
        })
    }

    /// Re-emit the compressed wire form.
    pub fn to_sourcemap(&self) -> String {
        self.locations
            .iter()
            .map(|loc| format!("{}:{}:{}", loc.offset, loc.length, loc.file_id))
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// Where in the submitted sources an issue was found.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLocation {
    pub source_map: SourceMap,
    pub source_type: SourceType,
    pub source_format: SourceFormat,
    pub source_list: Vec<String>,
}

impl ApiModel for SourceLocation {
    const NAME: &'static str = "SourceLocation";

    fn from_dict(d: &Value) -> Result<Self> {
        Ok(Self {
            source_map: SourceMap::parse(Self::NAME, pluck_str(Self::NAME, d, &["sourceMap"])?)?,
            source_type: SourceType::parse(
                Self::NAME,
                pluck_str(Self::NAME, d, &["sourceType"])?,
            )?,
            source_format: SourceFormat::parse(
                Self::NAME,
                pluck_str(Self::NAME, d, &["sourceFormat"])?,
            )?,
            source_list: pluck_string_list(Self::NAME, d, &["sourceList"])?,
        })
    }

    fn to_dict(&self) -> Result<Value> {
        Ok(json!({
            "sourceMap": self.source_map.to_sourcemap(),
            "sourceType": self.source_type.as_str(),
            "sourceFormat": self.source_format.as_str(),
            "sourceList": self.source_list,
        }))
    }
}

/// A source range decoded by the API into line and column numbers.
///
/// Wire form is a two-element array of `{line, column}` objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedLocation {
    pub start_line: u64,
    pub start_column: u64,
    pub end_line: u64,
    pub end_column: u64,
}

impl ApiModel for DecodedLocation {
    const NAME: &'static str = "DecodedLocation";

    fn from_dict(d: &Value) -> Result<Self> {
        let points = d.as_array().ok_or_else(|| ModelError::UnexpectedType {
            model: Self::NAME,
            path: String::new(),
            expected: "a two-point location array",
        })?;
        if points.len() < 2 {
            return Err(ModelError::UnexpectedType {
                model: Self::NAME,
                path: String::new(),
                expected: "a two-point location array",
            });
        }
        Ok(Self {
            start_line: pluck_u64(Self::NAME, &points[0], &["line"])?,
            start_column: pluck_u64(Self::NAME, &points[0], &["column"])?,
            end_line: pluck_u64(Self::NAME, &points[1], &["line"])?,
            end_column: pluck_u64(Self::NAME, &points[1], &["column"])?,
        })
    }

    fn to_dict(&self) -> Result<Value> {
        Ok(json!([
            {"line": self.start_line, "column": self.start_column},
            {"line": self.end_line, "column": self.end_column},
        ]))
    }
}

/// A single finding reported by the analysis pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Identifier of the violated check, e.g. `ARG-110`
    pub check_id: String,

    /// Human-readable title of the check
    pub check_title: String,

    /// One-line summary of the finding
    pub description_short: String,

    /// Full description of the finding
    pub description_long: String,

    /// Reported severity; a null severity on the wire maps to `None`
    pub severity: Severity,

    /// Source ranges the finding points at
    pub locations: Vec<SourceLocation>,

    /// Line/column ranges decoded by the platform, when available
    pub decoded_locations: Vec<DecodedLocation>,

    /// Engine-specific extra data, passed through untouched
    pub extra: Map<String, Value>,
}

impl ApiModel for Issue {
    const NAME: &'static str = "Issue";

    fn from_dict(d: &Value) -> Result<Self> {
        let severity = match pluck_opt_str(Self::NAME, d, &["severity"])? {
            None | Some("") => Severity::None,
            Some(raw) => Severity::parse(Self::NAME, raw)?,
        };
        let locations = pluck_array(Self::NAME, d, &["locations"])?
            .iter()
            .map(SourceLocation::from_dict)
            .collect::<Result<Vec<_>>>()?;
        let decoded_locations = match d.get("decodedLocations") {
            None | Some(Value::Null) => Vec::new(),
            Some(_) => pluck_array(Self::NAME, d, &["decodedLocations"])?
                .iter()
                .filter(|entry| !entry.is_null())
                .map(|entry| DecodedLocation::from_dict(entry))
                .collect::<Result<Vec<_>>>()?,
        };
        Ok(Self {
            check_id: pluck_str(Self::NAME, d, &["checkId"])?.to_string(),
            check_title: pluck_str(Self::NAME, d, &["checkTitle"])?.to_string(),
            description_short: pluck_str(Self::NAME, d, &["description", "head"])?.to_string(),
            description_long: pluck_str(Self::NAME, d, &["description", "tail"])?.to_string(),
            severity,
            locations,
            decoded_locations,
            extra: pluck_object(Self::NAME, d, &["extra"])?.clone(),
        })
    }

    fn to_dict(&self) -> Result<Value> {
        let locations = self
            .locations
            .iter()
            .map(SourceLocation::to_dict)
            .collect::<Result<Vec<_>>>()?;
        let mut d = json!({
            "checkId": self.check_id,
            "checkTitle": self.check_title,
            "description": {
                "head": self.description_short,
                "tail": self.description_long,
            },
            "severity": self.severity.as_str(),
            "locations": locations,
            "extra": self.extra,
        });
        if !self.decoded_locations.is_empty() {
            let decoded = self
                .decoded_locations
                .iter()
                .map(DecodedLocation::to_dict)
                .collect::<Result<Vec<_>>>()?;
            d["decodedLocations"] = json!(decoded);
        }
        Ok(d)
    }
}
