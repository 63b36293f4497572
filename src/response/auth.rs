//! Authentication response models

use std::sync::LazyLock;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use crate::error::Result;
use crate::model::{ApiModel, pluck_str};
use crate::schema::{self, Schema};

static LOGIN_SCHEMA: LazyLock<Schema> =
    LazyLock::new(|| schema::embedded("auth.json", include_str!("schemas/auth.json")));

static REFRESH_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    schema::embedded("auth-refresh.json", include_str!("schemas/auth-refresh.json"))
});

/// Response to a login call: a fresh JWT token pair.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthLoginResponse {
    /// Short-lived token sent with every API call
    pub access_token: String,

    /// Long-lived token used to obtain new access tokens
    pub refresh_token: String,
}

impl AuthLoginResponse {
    /// Expiry of the access token, taken from the JWT `exp` claim.
    ///
    /// The schema treats tokens as opaque strings, so a token that is not a
    /// decodable JWT yields `None` rather than an error.
    pub fn access_expires_at(&self) -> Option<DateTime<Utc>> {
        jwt_expiry(&self.access_token)
    }
}

impl ApiModel for AuthLoginResponse {
    const NAME: &'static str = "AuthLoginResponse";

    fn schema() -> Option<&'static Schema> {
        Some(&LOGIN_SCHEMA)
    }

    fn from_dict(d: &Value) -> Result<Self> {
        Self::validate(d)?;
        Ok(Self {
            access_token: pluck_str(Self::NAME, d, &["jwtTokens", "access"])?.to_string(),
            refresh_token: pluck_str(Self::NAME, d, &["jwtTokens", "refresh"])?.to_string(),
        })
    }

    fn to_dict(&self) -> Result<Value> {
        let d = json!({
            "jwtTokens": {
                "access": self.access_token,
                "refresh": self.refresh_token,
            }
        });
        Self::validate(&d)?;
        Ok(d)
    }
}

/// Response to a token refresh call. Same wire shape as a login response.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthRefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthRefreshResponse {
    /// Expiry of the refreshed access token, from the JWT `exp` claim.
    pub fn access_expires_at(&self) -> Option<DateTime<Utc>> {
        jwt_expiry(&self.access_token)
    }
}

impl ApiModel for AuthRefreshResponse {
    const NAME: &'static str = "AuthRefreshResponse";

    fn schema() -> Option<&'static Schema> {
        Some(&REFRESH_SCHEMA)
    }

    fn from_dict(d: &Value) -> Result<Self> {
        Self::validate(d)?;
        Ok(Self {
            access_token: pluck_str(Self::NAME, d, &["jwtTokens", "access"])?.to_string(),
            refresh_token: pluck_str(Self::NAME, d, &["jwtTokens", "refresh"])?.to_string(),
        })
    }

    fn to_dict(&self) -> Result<Value> {
        let d = json!({
            "jwtTokens": {
                "access": self.access_token,
                "refresh": self.refresh_token,
            }
        });
        Self::validate(&d)?;
        Ok(d)
    }
}

/// Response to a logout call. The API returns an empty object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthLogoutResponse;

impl ApiModel for AuthLogoutResponse {
    const NAME: &'static str = "AuthLogoutResponse";

    fn from_dict(d: &Value) -> Result<Self> {
        Self::validate(d)?;
        Ok(Self)
    }

    fn to_dict(&self) -> Result<Value> {
        let d = json!({});
        Self::validate(&d)?;
        Ok(d)
    }
}

/// Decode the expiry claim of a JWT without verifying its signature.
fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.get("exp")?.as_i64()?, 0)
}
