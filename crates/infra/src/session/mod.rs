//! Session store implementations
//!
//! - [`MemorySessionStore`]: lives as long as the process
//! - [`FileSessionStore`]: private JSON file, survives between CLI runs
//! - [`KeychainSessionStore`]: platform keychain via `keyring`

pub mod file;
pub mod keychain;
pub mod memory;

use std::sync::Arc;

use partsdesk_core::session::SessionStore;
use partsdesk_domain::{PartsDeskError, Result, SessionBackend, SessionConfig};

pub use file::FileSessionStore;
pub use keychain::KeychainSessionStore;
pub use memory::MemorySessionStore;

/// Build the store selected by `config.backend`.
pub fn open_store(config: &SessionConfig) -> Arc<dyn SessionStore> {
    match config.backend {
        SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
        SessionBackend::File => {
            let dir = config.path.clone().unwrap_or_else(FileSessionStore::default_dir);
            Arc::new(FileSessionStore::in_dir(dir))
        }
        SessionBackend::Keychain => Arc::new(KeychainSessionStore::new()),
    }
}

/// Run filesystem or keychain I/O off the async workers.
pub(crate) async fn run_blocking<T, F>(what: &'static str, task: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| PartsDeskError::Internal(format!("{what} task failed: {err}")))?
}
