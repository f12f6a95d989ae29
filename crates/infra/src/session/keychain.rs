use async_trait::async_trait;
use keyring::Entry;
use partsdesk_core::session::{Credential, SessionStore};
use partsdesk_domain::constants::{KEYCHAIN_SERVICE_NAME, SESSION_CREDENTIAL_KEY};
use partsdesk_domain::Result;
use tracing::debug;

use super::run_blocking;
use crate::errors::InfraError;

/// Credential kept in the platform keychain
#[derive(Debug, Clone)]
pub struct KeychainSessionStore {
    service: String,
    account: String,
}

impl KeychainSessionStore {
    pub fn new() -> Self {
        Self::with_service(KEYCHAIN_SERVICE_NAME)
    }

    pub fn with_service(service: impl Into<String>) -> Self {
        Self { service: service.into(), account: SESSION_CREDENTIAL_KEY.to_string() }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(&self.service, &self.account).map_err(|err| InfraError::from(err).into())
    }
}

impl Default for KeychainSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for KeychainSessionStore {
    async fn load(&self) -> Result<Option<Credential>> {
        let entry = self.entry()?;
        run_blocking("keychain", move || match entry.get_password() {
            Ok(token) => Credential::new(token).map(Some),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(InfraError::from(err).into()),
        })
        .await
    }

    async fn save(&self, credential: &Credential) -> Result<()> {
        let entry = self.entry()?;
        let token = credential.expose().to_string();
        run_blocking("keychain", move || {
            entry.set_password(&token).map_err(|err| InfraError::from(err).into())
        })
        .await?;
        debug!(service = %self.service, "credential stored in keychain");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let entry = self.entry()?;
        run_blocking("keychain", move || match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(InfraError::from(err).into()),
        })
        .await
    }
}
