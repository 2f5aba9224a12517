//! Provider wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use super::{ApiRequest, PaperlessProvider, TRACING_TARGET};
use crate::{Result, ServiceHealth};

/// Paperless service wrapper with observability.
///
/// This wrapper adds structured logging to any [`PaperlessProvider`]
/// implementation. The inner provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct PaperlessService {
    inner: Arc<dyn PaperlessProvider>,
}

impl fmt::Debug for PaperlessService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaperlessService").finish_non_exhaustive()
    }
}

impl PaperlessService {
    /// Create a new service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: PaperlessProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Sends a request through the wrapped provider.
    pub async fn request(&self, request: &ApiRequest) -> Result<Value> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            method = %request.method,
            endpoint = %request.endpoint,
            has_body = request.body.is_some(),
            "Sending request"
        );

        let result = self.inner.request(request).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(_) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    method = %request.method,
                    endpoint = %request.endpoint,
                    elapsed_ms = elapsed.as_millis(),
                    "Request completed"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    method = %request.method,
                    endpoint = %request.endpoint,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Request failed"
                );
            }
        }

        result
    }

    /// Performs a health check on the wrapped provider.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        let started_at = Instant::now();
        let health = self.inner.health_check().await?;

        tracing::debug!(
            target: TRACING_TARGET,
            status = ?health.status,
            elapsed_ms = started_at.elapsed().as_millis(),
            "Health check completed"
        );

        Ok(health)
    }
}
