//! Three-mode resource locator.
//!
//! Paperless objects (documents, tags, correspondents, ...) are referenced by
//! a locator that is either picked from a searchable list, typed in as a raw
//! numeric ID, or pasted as a document URL. All three forms resolve to one
//! bare identifying value.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

use crate::{Error, Result};

/// Pattern every "By ID" entry must match: a positive integer without leading zeros.
pub const ID_PATTERN: &str = r"^[1-9][0-9]*$";

/// Pattern for the "By URL" entry; the capture group holds the document ID.
pub const DOCUMENT_URL_PATTERN: &str = r"^(?:http|https)://(?:.+?)/documents/(\d+)/details$";

/// Error message reported when an ID does not match [`ID_PATTERN`].
pub const ID_ERROR_MESSAGE: &str = "The ID must be a positive integer";

/// Error message reported when a URL does not match [`DOCUMENT_URL_PATTERN`].
pub const URL_ERROR_MESSAGE: &str = "The URL must be a valid Paperless document URL (e.g. https://paperless.example.com/documents/123/details)";

static DOCUMENT_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DOCUMENT_URL_PATTERN).expect("document URL pattern is a valid regex")
});

/// Selection mode of a [`ResourceLocator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LocatorMode {
    /// Value selected from a searchable list.
    #[default]
    List,
    /// Raw numeric ID.
    Id,
    /// Paperless document URL.
    Url,
}

/// Reference to a remote Paperless object.
///
/// Serialized the way the host supplies it: `{"mode": "id", "value": "42"}`.
/// A missing `mode` is treated as [`LocatorMode::List`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocator", into = "RawLocator")]
pub enum ResourceLocator {
    /// Value picked from a list; passed through as given.
    List(Value),
    /// Raw ID entered by hand.
    Id(String),
    /// Document URL; the ID is extracted on resolution.
    Url(String),
}

impl ResourceLocator {
    /// Creates a locator for a raw numeric ID.
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Creates a locator for a document URL.
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    /// Creates a locator for a list-selected value.
    pub fn list(value: impl Into<Value>) -> Self {
        Self::List(value.into())
    }

    /// Returns the selection mode.
    pub fn mode(&self) -> LocatorMode {
        match self {
            Self::List(_) => LocatorMode::List,
            Self::Id(_) => LocatorMode::Id,
            Self::Url(_) => LocatorMode::Url,
        }
    }

    /// Resolves the locator to its bare identifying value.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error if a URL locator does not match
    /// [`DOCUMENT_URL_PATTERN`].
    pub fn resolve(&self) -> Result<Value> {
        match self {
            Self::List(value) => Ok(value.clone()),
            Self::Id(id) => Ok(Value::String(id.clone())),
            Self::Url(url) => extract_document_id(url)
                .map(|id| Value::String(id.to_owned()))
                .ok_or_else(|| {
                    Error::invalid_input()
                        .with_message(URL_ERROR_MESSAGE)
                        .with_context(url.clone())
                }),
        }
    }

    /// Returns the hand-entered text of an ID or URL locator.
    pub fn entered_value(&self) -> Option<&str> {
        match self {
            Self::List(_) => None,
            Self::Id(value) | Self::Url(value) => Some(value),
        }
    }
}

impl fmt::Display for ResourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(Value::String(value)) => write!(f, "list:{value}"),
            Self::List(value) => write!(f, "list:{value}"),
            Self::Id(id) => write!(f, "id:{id}"),
            Self::Url(url) => write!(f, "url:{url}"),
        }
    }
}

/// Parses command-line style input: anything starting with `http://` or
/// `https://` is a URL, everything else is a raw ID.
impl FromStr for ResourceLocator {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::url(s))
        } else {
            Ok(Self::id(s))
        }
    }
}

/// Extracts the document ID from a Paperless document URL.
pub fn extract_document_id(url: &str) -> Option<&str> {
    DOCUMENT_URL_REGEX
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str())
}

/// Coerces a JSON value to a numeric object ID.
///
/// Accepts non-negative integers and strings holding one.
pub fn coerce_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Wire shape of a locator as supplied by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawLocator {
    #[serde(default)]
    mode: LocatorMode,
    #[serde(default)]
    value: Value,
}

impl TryFrom<RawLocator> for ResourceLocator {
    type Error = Error;

    fn try_from(raw: RawLocator) -> Result<Self> {
        let mode = raw.mode;
        let text = |value: Value| match value {
            Value::String(text) => Ok(text),
            Value::Number(number) => Ok(number.to_string()),
            other => Err(Error::invalid_input()
                .with_message(format!("expected a string locator value for mode '{mode}'"))
                .with_context(other.to_string())),
        };

        match mode {
            LocatorMode::List => Ok(Self::List(raw.value)),
            LocatorMode::Id => text(raw.value).map(Self::Id),
            LocatorMode::Url => text(raw.value).map(Self::Url),
        }
    }
}

impl From<ResourceLocator> for RawLocator {
    fn from(locator: ResourceLocator) -> Self {
        let mode = locator.mode();
        let value = match locator {
            ResourceLocator::List(value) => value,
            ResourceLocator::Id(text) | ResourceLocator::Url(text) => Value::String(text),
        };
        Self { mode, value }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_resolve_by_id() {
        let locator = ResourceLocator::id("42");
        assert_eq!(locator.resolve().unwrap(), json!("42"));
    }

    #[test]
    fn test_resolve_by_url() {
        let locator = ResourceLocator::url("https://paperless.example.com/documents/123/details");
        assert_eq!(locator.resolve().unwrap(), json!("123"));
    }

    #[test]
    fn test_resolve_list_passes_value_through() {
        assert_eq!(ResourceLocator::list(7).resolve().unwrap(), json!(7));
        assert_eq!(ResourceLocator::list("9").resolve().unwrap(), json!("9"));
    }

    #[test]
    fn test_resolve_rejects_foreign_url() {
        let locator = ResourceLocator::url("https://example.com/tags/5/");
        let error = locator.resolve().unwrap_err();
        assert_eq!(error.kind(), crate::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_entered_value() {
        assert_eq!(ResourceLocator::id("7").entered_value(), Some("7"));
        assert_eq!(
            ResourceLocator::url("https://p/documents/1/details").entered_value(),
            Some("https://p/documents/1/details")
        );
        assert_eq!(ResourceLocator::list(7).entered_value(), None);
    }

    #[test]
    fn test_deserialize_modes() {
        let locator: ResourceLocator =
            serde_json::from_value(json!({"mode": "id", "value": "42"})).unwrap();
        assert_eq!(locator, ResourceLocator::id("42"));

        let locator: ResourceLocator = serde_json::from_value(json!({"value": 7})).unwrap();
        assert_eq!(locator, ResourceLocator::list(7));

        let locator: ResourceLocator =
            serde_json::from_value(json!({"mode": "id", "value": 12})).unwrap();
        assert_eq!(locator, ResourceLocator::id("12"));

        let result = serde_json::from_value::<ResourceLocator>(json!({"mode": "url", "value": []}));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_keeps_host_shape() {
        let value = serde_json::to_value(ResourceLocator::url("https://p/documents/1/details"))
            .unwrap();
        assert_eq!(
            value,
            json!({"mode": "url", "value": "https://p/documents/1/details"})
        );
    }

    #[test]
    fn test_from_str() {
        let locator: ResourceLocator = "https://p.example.com/documents/5/details".parse().unwrap();
        assert_eq!(locator.mode(), LocatorMode::Url);

        let locator: ResourceLocator = " 5 ".parse().unwrap();
        assert_eq!(locator, ResourceLocator::id("5"));
    }

    #[test]
    fn test_coerce_id() {
        assert_eq!(coerce_id(&json!(3)), Some(3));
        assert_eq!(coerce_id(&json!("4")), Some(4));
        assert_eq!(coerce_id(&json!("four")), None);
        assert_eq!(coerce_id(&json!(-1)), None);
        assert_eq!(coerce_id(&json!(null)), None);
    }
}
