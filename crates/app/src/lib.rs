//! # PartsDesk App
//!
//! Command-line application layer.
//!
//! This crate contains:
//! - CLI definition (`clap`)
//! - Commands; everything except the auth flows runs behind the session gate
//! - Application context (dependency injection)
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod cli;
pub mod commands;
pub mod context;
pub mod utils;

pub use context::AppContext;
