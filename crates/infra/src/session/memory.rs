use async_trait::async_trait;
use parking_lot::RwLock;
use partsdesk_core::session::{Credential, SessionStore};
use partsdesk_domain::Result;

/// Process-scoped credential slot
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    credential: RwLock<Option<Credential>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Credential>> {
        Ok(self.credential.read().clone())
    }

    async fn save(&self, credential: &Credential) -> Result<()> {
        *self.credential.write() = Some(credential.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.credential.write().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_load_clear() {
        let store = MemorySessionStore::new();
        assert!(store.load().await.unwrap().is_none());

        store.save(&Credential::new("tok").unwrap()).await.unwrap();
        assert_eq!(store.load().await.unwrap().unwrap().expose(), "tok");

        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }
}
