//! Configuration management

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_API_MAX_ATTEMPTS, DEFAULT_API_TIMEOUT_SECS};
use crate::impl_wire_enum_conversions;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix
    pub base_url: String,
    pub timeout_secs: u64,
    /// Total attempts per request (initial try + retries)
    pub max_attempts: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            max_attempts: DEFAULT_API_MAX_ATTEMPTS,
        }
    }
}

/// Where the session credential lives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// Process-scoped; gone when the process exits
    Memory,
    /// A private file inside the session directory
    #[default]
    File,
    /// Platform keychain
    Keychain,
}

impl_wire_enum_conversions!(SessionBackend {
    Memory => "memory",
    File => "file",
    Keychain => "keychain",
});

/// Session storage settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub backend: SessionBackend,
    /// Directory for the `file` backend; defaults to the OS temp dir
    pub path: Option<PathBuf>,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `partsdesk_infra=debug`
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string(), json: false }
    }
}
