//! # PartsDesk Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - HTTP client with retry and timeout support
//! - Backend API client and resource services
//! - Session stores (memory, file, platform keychain)
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `partsdesk-core`
//! - Contains all "impure" code (network, filesystem, keychain)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod session;

// Re-export commonly used items
pub use api::{ApiClient, ApiError, ApiErrorCategory, AuthService, HttpCredentialProbe};
pub use errors::InfraError;
pub use http::HttpClient;
pub use session::{open_store, FileSessionStore, KeychainSessionStore, MemorySessionStore};
