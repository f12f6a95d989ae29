//! Login and registration payloads

use serde::{Deserialize, Serialize};

use super::user::User;
use crate::constants::DEFAULT_REGISTRATION_ROLE;

/// Body for `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body for `POST /auth/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub rol: String,
}

impl RegisterRequest {
    /// Registration for a seller account; the email doubles as username.
    pub fn seller(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        let email = email.into();
        Self {
            name: name.into(),
            username: email.clone(),
            email,
            password: password.into(),
            confirm_password: confirm_password.into(),
            rol: DEFAULT_REGISTRATION_ROLE.to_string(),
        }
    }
}

/// Successful login body
///
/// Older backend builds return `access_token` at the top level instead of
/// under `data`; [`AuthResponse::access_token`] looks in both places.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<AuthPayload>,
    #[serde(default)]
    access_token: Option<String>,
}

/// `data` member of [`AuthResponse`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthPayload {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl AuthResponse {
    /// Bearer token issued by the backend, if any.
    pub fn access_token(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.access_token.as_deref())
            .or(self.access_token.as_deref())
            .filter(|token| !token.is_empty())
    }
}
