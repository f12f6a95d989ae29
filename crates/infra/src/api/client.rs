//! Backend API client
//!
//! Wraps [`HttpClient`] with base-URL joining, request signing and response
//! decoding. Every request reads the credential from the [`SessionContext`]
//! at send time, so a login or logout is picked up by the next call.

use std::future::Future;
use std::time::Duration;

use partsdesk_core::session::{Credential, SessionContext};
use partsdesk_domain::{ApiConfig, PartsDeskError};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::errors::ApiError;
use crate::http::HttpClient;

/// Client for the PartsDesk REST backend
#[derive(Clone)]
pub struct ApiClient {
    http_client: HttpClient,
    session: SessionContext,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Create a client for `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be built
    pub fn new(config: &ApiConfig, session: SessionContext) -> Result<Self, ApiError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .max_attempts(config.max_attempts)
            .user_agent(concat!("partsdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        Ok(Self {
            http_client,
            session,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(Method::GET, path, |request| request).await
    }

    /// GET with a serialized query string.
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::GET, path, |request| request.query(query)).await
    }

    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = to_json(body)?;
        self.execute(Method::POST, path, |request| request.json(&body)).await
    }

    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = to_json(body)?;
        self.execute(Method::PATCH, path, |request| request.json(&body)).await
    }

    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(Method::DELETE, path, |request| request).await
    }

    /// Send a bodiless request signed with `credential` instead of the
    /// stored one and return the raw response. Never retried.
    pub async fn send_as(
        &self,
        method: Method,
        path: &str,
        credential: &Credential,
    ) -> Result<Response, ApiError> {
        let request = self
            .http_client
            .request(method, self.url(path))
            .header(AUTHORIZATION, credential.bearer());
        self.dispatch(self.http_client.send_once(request)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn execute<T, F>(&self, method: Method, path: &str, customize: F) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(path);
        debug!(%method, url = %url, "API request");

        let request = self
            .http_client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        let request = customize(self.sign(request).await);

        let response = self.dispatch(self.http_client.send(request)).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {e}")))?;

        if !status.is_success() {
            debug!(%method, url = %url, %status, "API request rejected");
            return Err(ApiError::from_status(status, &body));
        }

        decode_body(status, &body)
    }

    async fn sign(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.credential().await {
            Ok(Some(credential)) => request.header(AUTHORIZATION, credential.bearer()),
            Ok(None) => request,
            Err(err) => {
                warn!(error = %err, "session store unreadable; sending unsigned request");
                request
            }
        }
    }

    async fn dispatch<F>(&self, sending: F) -> Result<Response, ApiError>
    where
        F: Future<Output = Result<Response, PartsDeskError>>,
    {
        match tokio::time::timeout(self.timeout, sending).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => Err(map_transport_error(err)),
            Err(_) => Err(ApiError::Timeout(self.timeout)),
        }
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Client(format!("Failed to serialize body: {e}")))
}

fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ApiError> {
    // 204/205 and empty 2xx bodies decode as `null`
    if status == StatusCode::NO_CONTENT
        || status == StatusCode::RESET_CONTENT
        || body.trim().is_empty()
    {
        return serde_json::from_value(Value::Null).map_err(|_| {
            ApiError::Decode(format!("empty response ({}) where a body was expected", status.as_u16()))
        });
    }

    serde_json::from_str(body).map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}")))
}

fn map_transport_error(err: PartsDeskError) -> ApiError {
    match err {
        PartsDeskError::Network(message) => ApiError::Network(message),
        other => ApiError::from(other),
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiConfig>,
    session: Option<SessionContext>,
}

impl ApiClientBuilder {
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut config = self.config.take().unwrap_or_default();
        config.base_url = base_url.into();
        self.config = Some(config);
        self
    }

    pub fn session(mut self, session: SessionContext) -> Self {
        self.session = Some(session);
        self
    }

    /// # Errors
    ///
    /// Returns error if no session was provided or client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let session =
            self.session.ok_or_else(|| ApiError::Config("Session context not set".to_string()))?;

        ApiClient::new(&config, session)
    }
}
