//! Outbound API request types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use uuid::Uuid;

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// A single request against the Paperless REST API.
///
/// The endpoint is relative to the API root, e.g. `/documents/42/`; the
/// provider is responsible for the base URL and authentication.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Unique identifier for this request, used to correlate logs.
    pub request_id: Uuid,
    /// HTTP method.
    pub method: Method,
    /// Endpoint path relative to the API root.
    pub endpoint: String,
    /// Optional JSON body.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Creates a new request without a body.
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            method,
            endpoint: endpoint.into(),
            body: None,
        }
    }

    /// Creates a `GET` request.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Get, endpoint)
    }

    /// Creates a `PATCH` request with a JSON body.
    pub fn patch(endpoint: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Patch, endpoint).with_body(body)
    }

    /// Sets the JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}
