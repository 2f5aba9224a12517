//! Error types for the reqwest-based provider.

use reqwest::StatusCode;
use thiserror::Error;

/// Maximum number of response body characters kept in error messages.
const MAX_BODY_CHARS: usize = 1024;

/// Result type alias for reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Invalid base URL or endpoint.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    /// The API answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl Error {
    /// Creates a status error, truncating the response body.
    pub fn status(status: StatusCode, body: &str) -> Self {
        let body = match body.char_indices().nth(MAX_BODY_CHARS) {
            Some((end, _)) => format!("{}...", &body[..end]),
            None => body.to_owned(),
        };

        Self::Status { status, body }
    }
}

fn status_error(status: StatusCode) -> paperless_core::Error {
    use paperless_core::Error as CoreError;

    match status.as_u16() {
        400 | 422 => CoreError::invalid_input(),
        401 => CoreError::authentication(),
        403 => CoreError::authorization(),
        404 => CoreError::not_found(),
        408 => CoreError::timeout(),
        429 => CoreError::rate_limited(),
        502..=504 => CoreError::service_unavailable(),
        _ => CoreError::external_error(),
    }
}

impl From<Error> for paperless_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    paperless_core::Error::timeout()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_connect() {
                    paperless_core::Error::network_error()
                        .with_message("Connection failed")
                        .with_source(e)
                } else if e.is_decode() {
                    paperless_core::Error::serialization()
                        .with_message(e.to_string())
                        .with_source(e)
                } else {
                    paperless_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => paperless_core::Error::serialization()
                .with_message("Invalid JSON in response body")
                .with_source(e),
            Error::Url(e) => paperless_core::Error::configuration()
                .with_message(e.to_string())
                .with_source(e),
            Error::Status { status, body } => {
                status_error(status).with_message(format!("HTTP {}: {body}", status.as_u16()))
            }
        }
    }
}
