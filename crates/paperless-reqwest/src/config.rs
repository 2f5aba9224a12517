//! Reqwest client configuration.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default Paperless-ngx address of a local installation.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for the Paperless API client.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ReqwestConfig {
    /// Root URL of the Paperless-ngx instance
    #[cfg_attr(
        feature = "config",
        arg(long = "paperless-url", env = "PAPERLESS_URL", default_value = DEFAULT_BASE_URL)
    )]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API token of the Paperless-ngx user
    #[cfg_attr(
        feature = "config",
        arg(long = "paperless-token", env = "PAPERLESS_TOKEN", hide_env_values = true)
    )]
    pub api_token: String,

    /// HTTP request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "http-timeout", env = "HTTP_TIMEOUT", default_value = "30")
    )]
    #[serde(default = "default_timeout_secs")]
    pub http_timeout: u64,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "HTTP_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl fmt::Debug for ReqwestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"<redacted>")
            .field("http_timeout", &self.http_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ReqwestConfig {
    /// Create a new configuration for the given instance and token.
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: api_token.into(),
            http_timeout: default_timeout_secs(),
            user_agent: None,
        }
    }

    /// Returns the timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.http_timeout == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.http_timeout)
        }
    }

    /// Returns the effective user agent, using default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(Self::default_user_agent)
    }

    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("paperless/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Returns the API root, i.e. the base URL with an `/api` suffix.
    ///
    /// A base URL that already ends in `/api` is used as is.
    pub fn api_root(&self) -> String {
        let base = self.base_url.trim().trim_end_matches('/');
        if base.ends_with("/api") {
            base.to_owned()
        } else {
            format!("{base}/api")
        }
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.http_timeout = timeout_secs;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config() {
        let config = ReqwestConfig::new("https://paperless.example.com", "secret");
        assert_eq!(config.http_timeout, 30);
        assert!(config.user_agent.is_none());
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ReqwestConfig::new("http://p", "t")
            .with_timeout(120)
            .with_user_agent("custom-agent/1.0");

        assert_eq!(config.http_timeout, 120);
        assert_eq!(config.effective_user_agent(), "custom-agent/1.0");
    }

    #[test]
    fn test_effective_timeout_uses_default_when_zero() {
        let config = ReqwestConfig::new("http://p", "t").with_timeout(0);
        assert_eq!(
            config.effective_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_effective_user_agent_uses_default_when_none() {
        let config = ReqwestConfig::new("http://p", "t");
        assert!(config.effective_user_agent().starts_with("paperless/"));
    }

    #[test]
    fn test_api_root() {
        let root = |base: &str| ReqwestConfig::new(base, "t").api_root();
        assert_eq!(root("https://p.example.com"), "https://p.example.com/api");
        assert_eq!(root("https://p.example.com/"), "https://p.example.com/api");
        assert_eq!(root("https://p.example.com/api/"), "https://p.example.com/api");
        assert_eq!(root("https://example.com/paperless"), "https://example.com/paperless/api");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ReqwestConfig::new("http://p", "very-secret-token");
        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret-token"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: ReqwestConfig =
            serde_json::from_str(r#"{"api_token": "t"}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.http_timeout, DEFAULT_TIMEOUT_SECS);
    }
}
