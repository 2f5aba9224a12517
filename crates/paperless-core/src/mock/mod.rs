//! Mock Paperless provider for testing.
//!
//! # Feature Flag
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! paperless-core = { version = "...", features = ["test-utils"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use paperless_core::mock::MockProvider;
//! use paperless_core::provider::Method;
//!
//! let provider = MockProvider::new()
//!     .with_response(Method::Get, "/documents/42/", json!({"id": 42, "tags": [1]}));
//! let service = provider.clone().into_service();
//! // ... run the executor ...
//! assert_eq!(provider.requests().len(), 2);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

use crate::provider::{ApiRequest, Method, PaperlessProvider, PaperlessService};
use crate::{Error, ErrorKind, Result, ServiceHealth};

#[derive(Debug, Default)]
struct MockState {
    responses: HashMap<(Method, String), Value>,
    failures: HashMap<(Method, String), ErrorKind>,
    requests: Vec<ApiRequest>,
}

/// Recording mock provider.
///
/// Returns the configured response for a `(method, endpoint)` pair. `PATCH`
/// requests without a configured response echo their body back; any other
/// unconfigured request fails with [`ErrorKind::NotFound`]. Every request is
/// recorded, including failed ones.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Creates a mock with no configured responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the response for a request.
    pub fn with_response(self, method: Method, endpoint: impl Into<String>, response: Value) -> Self {
        self.state()
            .responses
            .insert((method, endpoint.into()), response);
        self
    }

    /// Configures a request to fail with the given error kind.
    pub fn with_failure(self, method: Method, endpoint: impl Into<String>, kind: ErrorKind) -> Self {
        self.state().failures.insert((method, endpoint.into()), kind);
        self
    }

    /// Returns a snapshot of the recorded requests, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state().requests.clone()
    }

    /// Converts this mock into a [`PaperlessService`].
    pub fn into_service(self) -> PaperlessService {
        PaperlessService::new(self)
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl PaperlessProvider for MockProvider {
    async fn request(&self, request: &ApiRequest) -> Result<Value> {
        let mut state = self.state();
        state.requests.push(request.clone());

        let key = (request.method, request.endpoint.clone());
        if let Some(kind) = state.failures.get(&key) {
            return Err(Error::new(*kind).with_context(format!("{} {}", key.0, key.1)));
        }

        match (state.responses.get(&key), request.method, &request.body) {
            (Some(response), _, _) => Ok(response.clone()),
            (None, Method::Patch, Some(body)) => Ok(body.clone()),
            _ => Err(Error::not_found().with_context(format!("{} {}", key.0, key.1))),
        }
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        Ok(ServiceHealth::healthy())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_configured_response() {
        let provider = MockProvider::new().with_response(Method::Get, "/documents/1/", json!({"id": 1}));
        let response = provider.request(&ApiRequest::get("/documents/1/")).await.unwrap();
        assert_eq!(response, json!({"id": 1}));
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_patch_echoes_body() {
        let provider = MockProvider::new();
        let request = ApiRequest::patch("/documents/1/", json!({"title": "t"}));
        assert_eq!(provider.request(&request).await.unwrap(), json!({"title": "t"}));
    }

    #[tokio::test]
    async fn test_unconfigured_get_fails() {
        let provider = MockProvider::new();
        let error = provider.request(&ApiRequest::get("/documents/2/")).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_health_check() {
        let health = MockProvider::new().health_check().await.unwrap();
        assert!(health.is_healthy());
    }
}
