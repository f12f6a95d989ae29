//! Explicit session object shared by request signing and the gate

use std::sync::Arc;

use partsdesk_domain::Result;
use tracing::{debug, info};

use super::credential::Credential;
use super::ports::SessionStore;

/// Handle on the current session.
///
/// Cloning is cheap; every clone reads and writes the same store. Only
/// login, logout and the gate's failure path write to it.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Current credential, read fresh from the store on every call.
    pub async fn credential(&self) -> Result<Option<Credential>> {
        self.store.load().await
    }

    /// `true` when a credential is stored. Storage errors count as signed out.
    pub async fn is_signed_in(&self) -> bool {
        matches!(self.store.load().await, Ok(Some(_)))
    }

    /// Store the credential issued at login.
    pub async fn sign_in(&self, credential: &Credential) -> Result<()> {
        self.store.save(credential).await?;
        info!("session credential stored");
        Ok(())
    }

    /// Drop the stored credential.
    pub async fn sign_out(&self) -> Result<()> {
        self.store.clear().await?;
        debug!("session credential cleared");
        Ok(())
    }
}
