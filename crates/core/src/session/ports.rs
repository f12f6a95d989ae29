//! Port interfaces for session handling
//!
//! These traits define the boundaries between the gate and the
//! infrastructure that stores credentials and talks to the backend.

use async_trait::async_trait;
use partsdesk_domain::Result;
use thiserror::Error;

use super::credential::Credential;

/// Storage for the single session credential.
///
/// Implementations decide the medium (memory, file, keychain); callers only
/// see load/save/clear.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the stored credential, `None` when signed out.
    async fn load(&self) -> Result<Option<Credential>>;

    /// Replace the stored credential.
    async fn save(&self, credential: &Credential) -> Result<()>;

    /// Remove the stored credential. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<()>;
}

/// Why the backend did not accept a credential
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    #[error("credential rejected with status {status}")]
    Rejected { status: u16 },

    #[error("backend unreachable: {0}")]
    Unreachable(String),
}

/// Lightweight authenticated request used to validate a credential
#[async_trait]
pub trait CredentialProbe: Send + Sync {
    /// `Ok(())` when the backend answered 2xx for this credential.
    async fn probe(&self, credential: &Credential) -> std::result::Result<(), ProbeFailure>;
}
