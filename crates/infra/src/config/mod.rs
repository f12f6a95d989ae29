//! Configuration loading
//!
//! Layers `.env`, environment variables and an optional config file over
//! the defaults in [`partsdesk_domain::Config`].

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, normalize_base_url, probe_config_paths};
