//! API-specific error types
//!
//! Classifies backend failures and keeps the backend's own `message` text
//! so it can be shown to the user unchanged.

use std::time::Duration;

use partsdesk_domain::PartsDeskError;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 401 / 403
    Authentication,
    /// 429
    RateLimit,
    /// 5xx
    Server,
    /// Other 4xx, undecodable bodies, local validation
    Client,
    /// Connection failures and timeouts
    Network,
    /// Misconfiguration or session storage trouble
    Config,
}

/// API operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request rejected: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::NotFound(_) | Self::Client(_) | Self::Decode(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// Text without the category prefix, for showing to the user.
    pub fn message(&self) -> String {
        match self {
            Self::Auth(message)
            | Self::RateLimit(message)
            | Self::Server(message)
            | Self::NotFound(message)
            | Self::Client(message)
            | Self::Network(message)
            | Self::Config(message)
            | Self::Decode(message) => message.clone(),
            Self::Timeout(after) => format!("no answer after {}s", after.as_secs()),
        }
    }

    /// Build an error from a non-2xx response.
    ///
    /// The backend reports failures as `{ "message": "..." }` where
    /// `message` is a string or, for validation failures, a list of strings.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = backend_message(body)
            .unwrap_or_else(|| format!("{STATUS_FALLBACK_PREFIX}{}", status.as_u16()));

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Auth(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimit(message),
            s if s.is_server_error() => Self::Server(message),
            s if s.is_client_error() => Self::Client(message),
            _ => Self::Network(message),
        }
    }
}

const STATUS_FALLBACK_PREFIX: &str = "request failed with status ";

/// True when `message` came from the status code rather than the backend.
pub(crate) fn is_status_fallback(message: &str) -> bool {
    message.starts_with(STATUS_FALLBACK_PREFIX)
}

fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = match value.get("message")? {
        Value::String(text) => text.trim().to_string(),
        Value::Array(parts) => {
            parts.iter().filter_map(Value::as_str).collect::<Vec<_>>().join("; ")
        }
        _ => return None,
    };
    (!message.is_empty()).then_some(message)
}

impl From<PartsDeskError> for ApiError {
    fn from(err: PartsDeskError) -> Self {
        match err {
            PartsDeskError::Network(message) => Self::Network(message),
            PartsDeskError::Auth(message) => Self::Auth(message),
            PartsDeskError::NotFound(message) => Self::NotFound(message),
            PartsDeskError::InvalidInput(message) => Self::Client(message),
            PartsDeskError::Config(message)
            | PartsDeskError::Storage(message)
            | PartsDeskError::Internal(message) => Self::Config(message),
        }
    }
}

impl From<ApiError> for PartsDeskError {
    fn from(err: ApiError) -> Self {
        match err.category() {
            ApiErrorCategory::Authentication => Self::Auth(err.message()),
            ApiErrorCategory::Client if matches!(err, ApiError::NotFound(_)) => {
                Self::NotFound(err.message())
            }
            ApiErrorCategory::Client => Self::InvalidInput(err.message()),
            ApiErrorCategory::Config => Self::Config(err.message()),
            ApiErrorCategory::RateLimit
            | ApiErrorCategory::Server
            | ApiErrorCategory::Network => Self::Network(err.message()),
        }
    }
}
