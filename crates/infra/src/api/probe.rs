//! Credential probe backed by a lightweight authenticated GET

use std::sync::Arc;

use async_trait::async_trait;
use partsdesk_core::session::{Credential, CredentialProbe, ProbeFailure};
use partsdesk_domain::constants::PROBE_PATH;
use reqwest::Method;
use tracing::debug;

use super::client::ApiClient;

/// Validates a credential with `GET /products?limit=1`
pub struct HttpCredentialProbe {
    client: Arc<ApiClient>,
    path: String,
}

impl HttpCredentialProbe {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client, path: PROBE_PATH.to_string() }
    }

    /// Probe a different endpoint.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

#[async_trait]
impl CredentialProbe for HttpCredentialProbe {
    async fn probe(&self, credential: &Credential) -> Result<(), ProbeFailure> {
        match self.client.send_as(Method::GET, &self.path, credential).await {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => {
                let status = response.status().as_u16();
                debug!(status, "probe rejected");
                Err(ProbeFailure::Rejected { status })
            }
            Err(err) => Err(ProbeFailure::Unreachable(err.message())),
        }
    }
}
