//! Transport seam between the executor and the Paperless REST API.

mod request;
mod service;

pub use request::{ApiRequest, Method};
pub use service::PaperlessService;

use crate::{Result, ServiceHealth};

/// Tracing target for provider operations.
pub const TRACING_TARGET: &str = "paperless_core::provider";

/// Core trait for Paperless API transports.
///
/// Implementations own authentication, base URL resolution and translation of
/// transport failures into [`crate::Error`]. A request either yields the
/// decoded JSON response or fails; retries are not expected.
#[async_trait::async_trait]
pub trait PaperlessProvider: Send + Sync {
    /// Sends a request and returns the decoded JSON response body.
    async fn request(&self, request: &ApiRequest) -> Result<serde_json::Value>;

    /// Performs a health check on the provider.
    async fn health_check(&self) -> Result<ServiceHealth>;
}
