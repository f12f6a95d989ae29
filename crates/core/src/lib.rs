//! # PartsDesk Core
//!
//! Pure client logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Response envelope normalization
//! - The session gate and its ports (credential store, credential probe)
//! - Dashboard statistics, catalog search, quote/sale drafts
//!
//! ## Architecture Principles
//! - Only depends on `partsdesk-domain`
//! - No HTTP, filesystem or keychain code
//! - All external dependencies via traits

pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod envelope;
pub mod orders;
pub mod session;

pub use catalog::{filter_by_name, Named};
pub use dashboard::DashboardStats;
pub use envelope::{extract_data, extract_entities, extract_listing, Envelope, Listing};
pub use orders::{DraftLine, DraftLines, QuoteDraft, SaleDraft};
pub use session::{
    Credential, CredentialProbe, DenyReason, GateActivation, GateState, Guarded, ProbeFailure,
    SessionContext, SessionGate, SessionStore, TokenClaims,
};
