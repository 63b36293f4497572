//! Authentication request models

use std::sync::LazyLock;

use serde_json::{Value, json};

use crate::error::Result;
use crate::model::{ApiModel, pluck_str};
use crate::request::{HttpMethod, RequestModel};
use crate::schema::{self, Schema};

static LOGIN_SCHEMA: LazyLock<Schema> =
    LazyLock::new(|| schema::embedded("auth-login.json", include_str!("schemas/auth-login.json")));

static REFRESH_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    schema::embedded("auth-refresh.json", include_str!("schemas/auth-refresh.json"))
});

/// Request exchanging account credentials for a JWT token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthLoginRequest {
    pub username: String,
    pub password: String,
}

impl AuthLoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl ApiModel for AuthLoginRequest {
    const NAME: &'static str = "AuthLoginRequest";

    fn schema() -> Option<&'static Schema> {
        Some(&LOGIN_SCHEMA)
    }

    fn from_dict(d: &Value) -> Result<Self> {
        Self::validate(d)?;
        Ok(Self {
            username: pluck_str(Self::NAME, d, &["username"])?.to_string(),
            password: pluck_str(Self::NAME, d, &["password"])?.to_string(),
        })
    }

    fn to_dict(&self) -> Result<Value> {
        let d = json!({
            "username": self.username,
            "password": self.password,
        });
        Self::validate(&d)?;
        Ok(d)
    }
}

impl RequestModel for AuthLoginRequest {
    fn endpoint(&self) -> String {
        "v1/auth/login".to_string()
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }
}

/// Request trading a refresh token for a new token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRefreshRequest {
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthRefreshRequest {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl ApiModel for AuthRefreshRequest {
    const NAME: &'static str = "AuthRefreshRequest";

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

impl RequestModel for AuthRefreshRequest {
    fn endpoint(&self) -> String {
        "v1/auth/refresh".to_string()
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }
}

/// Request invalidating the current session. Carries no data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthLogoutRequest;

impl ApiModel for AuthLogoutRequest {
    const NAME: &'static str = "AuthLogoutRequest";

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

impl RequestModel for AuthLogoutRequest {
    fn endpoint(&self) -> String {
        "v1/auth/logout".to_string()
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }
}
