//! Configuration loader
//!
//! ## Loading Strategy
//! 1. `.env` in the working directory is read into the environment
//!    (existing variables win)
//! 2. The first config file found by [`probe_config_paths`] is parsed, or
//!    defaults are used when there is none
//! 3. Environment variables override individual fields
//! 4. The base URL is normalized to end in `/api`
//! 5. Zero timeouts and attempt counts are rejected
//!
//! ## Environment Variables
//! - `PARTSDESK_API_URL`: backend base URL
//! - `PARTSDESK_API_TIMEOUT_SECS`: request timeout in seconds
//! - `PARTSDESK_API_MAX_ATTEMPTS`: attempts per request
//! - `PARTSDESK_SESSION_BACKEND`: `memory`, `file` or `keychain`
//! - `PARTSDESK_SESSION_PATH`: directory for the session file
//! - `PARTSDESK_LOG`: log filter directive
//! - `PARTSDESK_LOG_JSON`: JSON log lines (true/false)
//!
//! ## File Locations
//! `./partsdesk.toml`, `./partsdesk.json`, then `partsdesk/config.toml`
//! under the user config directory (`$XDG_CONFIG_HOME` or `~/.config`).

use std::path::{Path, PathBuf};

use partsdesk_domain::constants::API_PATH_SUFFIX;
use partsdesk_domain::{Config, PartsDeskError, Result, SessionBackend};
use url::Url;

/// Load configuration from all sources.
///
/// # Errors
/// Returns `PartsDeskError::Config` if the config file is malformed or an
/// environment variable has an invalid value.
pub fn load() -> Result<Config> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "ignoring unreadable .env"),
    }

    let base = match probe_config_paths() {
        Some(path) => load_from_file(&path)?,
        None => Config::default(),
    };

    let mut config = apply_env(base)?;
    config.api.base_url = normalize_base_url(&config.api.base_url)?;
    validate(config)
}

/// Defaults overridden by environment variables only.
///
/// # Errors
/// Returns `PartsDeskError::Config` on invalid values.
pub fn load_from_env() -> Result<Config> {
    let mut config = apply_env(Config::default())?;
    config.api.base_url = normalize_base_url(&config.api.base_url)?;
    validate(config)
}

/// Parse a config file. Format is detected by extension.
///
/// # Errors
/// Returns `PartsDeskError::Config` if the file is missing or invalid.
pub fn load_from_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(PartsDeskError::Config(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| PartsDeskError::Config(format!("Failed to read config file: {e}")))?;

    validate(parse_config(&contents, path)?)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PartsDeskError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PartsDeskError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PartsDeskError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file, if any.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join("partsdesk.toml"));
        candidates.push(cwd.join("partsdesk.json"));
    }

    let config_home = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")));
    if let Some(dir) = config_home {
        candidates.push(dir.join("partsdesk").join("config.toml"));
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Ensure the base URL is absolute and ends in `/api`.
///
/// `https://host` and `https://host/` become `https://host/api`;
/// `https://host/api/` becomes `https://host/api`.
///
/// # Errors
/// Returns `PartsDeskError::Config` if the URL does not parse.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed)
        .map_err(|e| PartsDeskError::Config(format!("Invalid API URL '{raw}': {e}")))?;

    if trimmed.ends_with(API_PATH_SUFFIX) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}{API_PATH_SUFFIX}"))
    }
}

fn validate(config: Config) -> Result<Config> {
    if config.api.timeout_secs == 0 {
        return Err(PartsDeskError::Config("API timeout must be at least one second".into()));
    }
    if config.api.max_attempts == 0 {
        return Err(PartsDeskError::Config("API max attempts must be at least one".into()));
    }
    Ok(config)
}

fn apply_env(mut config: Config) -> Result<Config> {
    if let Some(url) = env_opt("PARTSDESK_API_URL") {
        config.api.base_url = url;
    }
    if let Some(secs) = env_opt("PARTSDESK_API_TIMEOUT_SECS") {
        config.api.timeout_secs = secs
            .parse()
            .map_err(|e| PartsDeskError::Config(format!("Invalid API timeout: {e}")))?;
    }
    if let Some(attempts) = env_opt("PARTSDESK_API_MAX_ATTEMPTS") {
        config.api.max_attempts = attempts
            .parse()
            .map_err(|e| PartsDeskError::Config(format!("Invalid max attempts: {e}")))?;
    }
    if let Some(backend) = env_opt("PARTSDESK_SESSION_BACKEND") {
        config.session.backend =
            backend.parse::<SessionBackend>().map_err(PartsDeskError::Config)?;
    }
    if let Some(path) = env_opt("PARTSDESK_SESSION_PATH") {
        config.session.path = Some(PathBuf::from(path));
    }
    if let Some(level) = env_opt("PARTSDESK_LOG") {
        config.logging.level = level;
    }
    config.logging.json = env_bool("PARTSDESK_LOG_JSON", config.logging.json);

    Ok(config)
}

/// Non-empty environment variable
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    env_opt(key)
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
