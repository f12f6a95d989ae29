//! Login, registration and logout against `/auth`

use std::sync::Arc;

use partsdesk_core::auth::{validate_login, validate_registration};
use partsdesk_core::session::{Credential, SessionContext, TokenClaims};
use partsdesk_domain::{AuthResponse, LoginRequest, RegisterRequest};
use tracing::{info, instrument, warn};

use super::client::ApiClient;
use super::errors::{is_status_fallback, ApiError};

const LOGIN_FAILED: &str = "login failed";

/// Authentication flows. Only this service and the gate write to the
/// session store.
pub struct AuthService {
    client: Arc<ApiClient>,
    session: SessionContext,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let session = client.session().clone();
        Self { client, session }
    }

    /// Exchange username and password for a bearer credential and store it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] with the backend's message when the
    /// backend refuses the login, or when it answers without a token. No
    /// credential is stored in either case.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        validate_login(username, password)?;

        let request =
            LoginRequest { username: username.trim().to_string(), password: password.to_string() };
        let response: AuthResponse =
            self.client.post("/auth/login", &request).await.map_err(|err| match err {
                ApiError::Auth(message) | ApiError::Client(message) | ApiError::NotFound(message) => {
                    refused(message)
                }
                other => other,
            })?;

        let Some(token) = response.access_token() else {
            warn!("login succeeded without an access token");
            return Err(refused(response.message.clone().unwrap_or_default()));
        };

        let credential = Credential::new(token)?;
        self.session.sign_in(&credential).await?;
        info!("login succeeded");
        Ok(response)
    }

    /// Create a seller account. Does not sign in.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        validate_registration(request)?;
        let response: AuthResponse = self.client.post("/auth/register", request).await?;
        info!("registration accepted");
        Ok(response)
    }

    /// Forget the stored credential. Never touches the network.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.session.sign_out().await?;
        Ok(())
    }

    /// Claims of the stored credential, `None` when signed out.
    pub async fn whoami(&self) -> Result<Option<TokenClaims>, ApiError> {
        let Some(credential) = self.session.credential().await? else {
            return Ok(None);
        };
        let claims = TokenClaims::decode(credential.expose())
            .ok_or_else(|| ApiError::Decode("stored credential is not a readable JWT".into()))?;
        Ok(Some(claims))
    }
}

/// Backend's own wording when it gave one, else a generic refusal.
fn refused(message: String) -> ApiError {
    if message.trim().is_empty() || is_status_fallback(&message) {
        ApiError::Auth(LOGIN_FAILED.to_string())
    } else {
        ApiError::Auth(message)
    }
}
