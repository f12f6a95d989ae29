//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for PartsDesk
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PartsDeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PartsDeskError {
    /// Stable label suitable for structured logging.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::Storage(_) => "storage",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for PartsDesk operations
pub type Result<T> = std::result::Result<T, PartsDeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let err = PartsDeskError::Auth("token rejected".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Auth");
        assert_eq!(json["message"], "token rejected");
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(PartsDeskError::Network(String::new()).label(), "network");
        assert_eq!(PartsDeskError::InvalidInput(String::new()).label(), "invalid_input");
    }
}
