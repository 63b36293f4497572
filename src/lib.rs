//! Domain models for the Argus security-analysis API
//!
//! Typed request and response payloads for the Argus platform, each bound
//! to a JSON Schema document and an explicit field mapping. The HTTP
//! transport that actually calls the API lives elsewhere; these types
//! guarantee that whatever crosses the wire matches the published schemas
//! in both directions: payloads are validated before fields are extracted,
//! and again when an instance serializes itself.
//!
//! # Example
//!
//! ```
//! use argus_models::ApiModel;
//! use argus_models::request::{AnalysisInputRequest, RequestModel};
//! use argus_models::response::AuthLoginResponse;
//!
//! let login = AuthLoginResponse::from_json(
//!     r#"{"jwtTokens": {"access": "a1", "refresh": "r1"}}"#,
//! )
//! .unwrap();
//! assert_eq!(login.access_token, "a1");
//!
//! let input = AnalysisInputRequest::new("abc-123");
//! assert_eq!(input.endpoint(), "v1/analyses/abc-123/input");
//! ```

pub mod error;
pub mod model;
pub mod request;
pub mod response;
pub mod schema;

mod time;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::{ModelError, Result, SchemaError, ValidationError};
pub use model::ApiModel;
pub use request::{HttpMethod, RequestModel};
pub use schema::Schema;
