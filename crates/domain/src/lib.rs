//! # PartsDesk Domain
//!
//! Business domain types and models for the PartsDesk warehouse client.
//!
//! This crate contains:
//! - Warehouse entities (Product, Supplier, Quote, Sale, User)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other PartsDesk crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
