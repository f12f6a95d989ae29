use std::time::Duration;

use partsdesk_domain::constants::{DEFAULT_API_MAX_ATTEMPTS, DEFAULT_API_TIMEOUT_SECS};
use partsdesk_domain::PartsDeskError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::errors::InfraError;

const DEFAULT_BACKOFF: Duration = Duration::from_millis(200);
const MAX_BACKOFF_DOUBLINGS: u32 = 6;

/// Transport shared by every backend call.
///
/// Makes one attempt per request unless built with
/// [`HttpClientBuilder::max_attempts`] above one. Retries cover 5xx answers
/// and connection-level failures; anything else is handed back as-is.
#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: ReqwestClient,
    retry: RetryPolicy,
}

#[derive(Clone, Copy, Debug)]
struct RetryPolicy {
    attempts: usize,
    backoff: Duration,
}

impl RetryPolicy {
    /// Wait before attempt `next` (2, 3, ...): backoff, then doubled.
    fn delay_before(&self, next: usize) -> Duration {
        let doublings = (next.saturating_sub(2) as u32).min(MAX_BACKOFF_DOUBLINGS);
        self.backoff.saturating_mul(1 << doublings)
    }

    fn allows(&self, next: usize) -> bool {
        next <= self.attempts
    }
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    pub fn new() -> Result<Self, PartsDeskError> {
        Self::builder().build()
    }

    pub fn request<U: reqwest::IntoUrl>(&self, method: Method, url: U) -> RequestBuilder {
        self.inner.request(method, url)
    }

    /// Send `builder`, retrying per the client's policy.
    ///
    /// Non-2xx responses are returned as responses; only transport failures
    /// become errors.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, PartsDeskError> {
        self.send_with(builder, self.retry).await
    }

    /// Send `builder` exactly once, whatever the retry policy.
    pub async fn send_once(&self, builder: RequestBuilder) -> Result<Response, PartsDeskError> {
        self.send_with(builder, RetryPolicy { attempts: 1, ..self.retry }).await
    }

    async fn send_with(
        &self,
        builder: RequestBuilder,
        retry: RetryPolicy,
    ) -> Result<Response, PartsDeskError> {
        let mut attempt = 1;
        loop {
            let request = builder
                .try_clone()
                .ok_or_else(|| {
                    PartsDeskError::Internal("streaming request body cannot be resent".into())
                })?
                .build()
                .map_err(to_domain)?;
            let (method, url) = (request.method().clone(), request.url().clone());
            debug!(attempt, %method, %url, "http request");

            let outcome = self.inner.execute(request).await;
            let retryable = match &outcome {
                Ok(response) => response.status().is_server_error(),
                Err(err) => err.is_connect() || err.is_timeout() || err.is_request(),
            };

            if !retryable || !retry.allows(attempt + 1) {
                return match outcome {
                    Ok(response) => {
                        debug!(attempt, %method, %url, status = %response.status(), "http response");
                        Ok(response)
                    }
                    Err(err) => Err(to_domain(err)),
                };
            }

            let delay = retry.delay_before(attempt + 1);
            let delay_ms = delay.as_millis() as u64;
            warn!(attempt, %method, %url, delay_ms, "retrying http request");
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

fn to_domain(err: reqwest::Error) -> PartsDeskError {
    InfraError::from(err).into()
}

/// Builder for [`HttpClient`]
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    retry: RetryPolicy,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            retry: RetryPolicy { attempts: DEFAULT_API_MAX_ATTEMPTS, backoff: DEFAULT_BACKOFF },
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total attempts per request, first try included. Zero is treated as one.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.retry.attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.retry.backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, PartsDeskError> {
        let builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();
        let builder = match self.user_agent {
            Some(agent) => builder.user_agent(agent),
            None => builder,
        };
        Ok(HttpClient { inner: builder.build().map_err(to_domain)?, retry: self.retry })
    }
}
