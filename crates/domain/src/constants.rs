//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Backend
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4001/api";
pub const API_PATH_SUFFIX: &str = "/api";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 60; // leaves room for quote email dispatch
pub const DEFAULT_API_MAX_ATTEMPTS: usize = 1;

// Session
pub const SESSION_CREDENTIAL_KEY: &str = "token";
pub const SESSION_FILE_NAME: &str = "session.json";
pub const KEYCHAIN_SERVICE_NAME: &str = "partsdesk";
pub const PROBE_PATH: &str = "/products?limit=1";

// Dashboard
pub const LOW_STOCK_THRESHOLD: i64 = 10;

// Registration
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const DEFAULT_REGISTRATION_ROLE: &str = "VENDEDOR";
