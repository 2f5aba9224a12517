//! Reqwest-based Paperless-ngx API client.

use std::sync::Arc;
use std::time::Instant;

use paperless_core::{
    ApiRequest, Method, PaperlessProvider, PaperlessService, ServiceHealth,
};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use url::Url;

use crate::{Error, ReqwestConfig, Result, TRACING_TARGET};

/// Inner client that holds the HTTP client and configuration.
struct ReqwestClientInner {
    http: Client,
    config: ReqwestConfig,
    api_root: Url,
}

/// Reqwest-based client for the Paperless-ngx REST API.
///
/// Implements [`PaperlessProvider`]: endpoints are resolved against
/// `{base_url}/api` and every request carries the configured API token.
///
/// # Examples
///
/// ```rust,ignore
/// use paperless_reqwest::{ReqwestClient, ReqwestConfig};
///
/// let config = ReqwestConfig::new("https://paperless.example.com", token);
/// let service = ReqwestClient::new(config)?.into_service();
/// ```
#[derive(Clone)]
pub struct ReqwestClient {
    inner: Arc<ReqwestClientInner>,
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClient")
            .field("config", &self.inner.config)
            .field("api_root", &self.inner.api_root.as_str())
            .finish_non_exhaustive()
    }
}

impl ReqwestClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(config: ReqwestConfig) -> Result<Self> {
        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();
        let api_root = Url::parse(&config.api_root())?;

        tracing::debug!(
            target: TRACING_TARGET,
            api_root = %api_root,
            timeout_ms = timeout.as_millis(),
            "Creating reqwest client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .build()?;

        let inner = ReqwestClientInner {
            http,
            config,
            api_root,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.inner.config
    }

    /// Converts this client into a [`PaperlessService`].
    pub fn into_service(self) -> PaperlessService {
        PaperlessService::new(self)
    }

    /// Resolves an endpoint such as `/documents/42/` against the API root.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        let root = self.inner.api_root.as_str().trim_end_matches('/');
        let endpoint = endpoint.trim_start_matches('/');
        Ok(Url::parse(&format!("{root}/{endpoint}"))?)
    }

    fn authorized(&self, method: Method, url: Url) -> RequestBuilder {
        let method = match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        self.inner
            .http
            .request(method, url)
            .header(AUTHORIZATION, format!("Token {}", self.inner.config.api_token))
            .header(ACCEPT, "application/json")
    }

    async fn send(&self, request: &ApiRequest) -> Result<Value> {
        let url = self.endpoint_url(&request.endpoint)?;
        let mut builder = self.authorized(request.method, url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            status = status.as_u16(),
            bytes = text.len(),
            "Received response"
        );

        if !status.is_success() {
            return Err(Error::status(status, &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait::async_trait]
impl PaperlessProvider for ReqwestClient {
    async fn request(&self, request: &ApiRequest) -> paperless_core::Result<Value> {
        tracing::trace!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            method = %request.method,
            endpoint = %request.endpoint,
            "Sending request"
        );

        Ok(self.send(request).await?)
    }

    async fn health_check(&self) -> paperless_core::Result<ServiceHealth> {
        let started = Instant::now();
        let url = self.endpoint_url("/").map_err(paperless_core::Error::from)?;

        let response = self
            .authorized(Method::Get, url)
            .send()
            .await
            .map_err(Error::from)?;

        let status = response.status();
        let health = if status.is_success() {
            ServiceHealth::healthy()
        } else {
            ServiceHealth::unhealthy(format!("HTTP {}", status.as_u16()))
        };

        Ok(health.with_response_time(started.elapsed()))
    }
}
