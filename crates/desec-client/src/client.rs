//! Main deSEC API client implementation.

use crate::api::{DomainApi, RrsetApi};
use crate::config::RateLimit;
use desec_core::{DesecError, Result};
use governor::{DefaultDirectRateLimiter, RateLimiter};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client as HttpClient, Method};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// The deSEC API base URL
pub const DEFAULT_BASE_URL: &str = "https://desec.io/api/v1";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client bound to one deSEC zone
#[derive(Clone)]
pub struct DesecClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: Url,
    domain: String,
    limiter: Option<DefaultDirectRateLimiter>,
}

impl DesecClient {
    /// Create a client for `domain` with default settings
    pub fn new(token: impl Into<String>, domain: impl Into<String>) -> Result<Self> {
        DesecClientBuilder::new(token, domain).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(token: impl Into<String>, domain: impl Into<String>) -> DesecClientBuilder {
        DesecClientBuilder::new(token, domain)
    }

    /// Zone apex this client manages
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.inner.domain
    }

    /// Access RRset endpoints
    #[must_use]
    pub fn rrsets(&self) -> RrsetApi<'_> {
        RrsetApi::new(self)
    }

    /// Access zone-level endpoints
    #[must_use]
    pub fn zone(&self) -> DomainApi<'_> {
        DomainApi::new(self)
    }

    /// Build `{base}/domains/{domain}/{segments...}/`
    pub(crate) fn zone_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| DesecError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(["domains", self.inner.domain.as_str()])
            .extend(segments)
            .push("");
        Ok(url)
    }

    /// Perform a PUT request with JSON body
    pub(crate) async fn put<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<()> {
        self.send_json(Method::PUT, url, body).await
    }

    /// Perform a POST request with JSON body
    pub(crate) async fn post<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<()> {
        self.send_json(Method::POST, url, body).await
    }

    /// Perform a PATCH request with JSON body
    pub(crate) async fn patch<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<()> {
        self.send_json(Method::PATCH, url, body).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<()> {
        if let Some(limiter) = &self.inner.limiter {
            limiter.until_ready().await;
        }

        debug!(url = %url, "{method} request");

        let response = self
            .inner
            .http
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(|e| DesecError::Http(e.to_string()))?;

        self.handle_empty_response(response).await
    }

    /// Handle an API response whose body is not needed on success
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();
        debug!(status = status.as_u16(), "response");

        if status.is_success() {
            Ok(())
        } else {
            self.handle_error(status.as_u16(), response).await
        }
    }

    /// Convert an error response to a DesecError, keeping the raw body
    async fn handle_error<T>(&self, status: u16, response: reqwest::Response) -> Result<T> {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());
        let body = response.text().await.unwrap_or_default();

        match status {
            401 => Err(DesecError::Unauthorized { body }),
            404 => Err(DesecError::NotFound { resource: body }),
            429 => {
                warn!("Rate limited by deSEC API");
                Err(DesecError::RateLimited { retry_after, body })
            }
            _ => Err(DesecError::Api {
                code: status,
                message: body,
            }),
        }
    }
}

/// Builder for configuring a [`DesecClient`]
pub struct DesecClientBuilder {
    token: String,
    domain: String,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    rate_limit: Option<RateLimit>,
}

impl DesecClientBuilder {
    /// Create a new builder for `domain`, authenticating with `token`
    #[must_use]
    pub fn new(token: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            domain: domain.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("desec-apply/{}", env!("CARGO_PKG_VERSION")),
            rate_limit: None,
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Pace requests client-side
    #[must_use]
    pub fn rate_limit(mut self, limit: Option<RateLimit>) -> Self {
        self.rate_limit = limit;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<DesecClient> {
        let domain = self.domain.trim().trim_end_matches('.').to_lowercase();
        if domain.is_empty() {
            return Err(DesecError::Config("zone domain is empty".to_string()));
        }
        if self.token.trim().is_empty() {
            return Err(DesecError::Config("API token is empty".to_string()));
        }

        let base_url =
            Url::parse(&self.base_url).map_err(|e| DesecError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(DesecError::InvalidUrl(self.base_url));
        }

        let mut auth = HeaderValue::from_str(&format!("Token {}", self.token.trim()))
            .map_err(|_| DesecError::Config("API token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|e| DesecError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(DesecClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                domain,
                limiter: self.rate_limit.map(|l| RateLimiter::direct(l.quota())),
            }),
        })
    }
}
