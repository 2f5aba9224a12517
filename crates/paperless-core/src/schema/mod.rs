//! Declarative parameter schema and host-side validation.
//!
//! The schema has no runtime behaviour of its own: hosts render it and use
//! [`validate`] to reject malformed input before the executor runs.

mod descriptor;
mod document;

use jiff::Timestamp;
use jiff::civil::{Date, DateTime};

pub use self::descriptor::{
    DefaultValue, DisplayCondition, DisplayOptions, FieldDescriptor, FieldKind,
    LocatorModeDescriptor, ValidationRule,
};
pub use self::document::document_update;
use crate::document::UpdateParameters;
use crate::{Error, Result};

/// Validates one item's parameters the way the host does before execution.
///
/// Every locator is checked against its field in the `document` / `update`
/// table: the locator's mode must be declared for that field and a typed-in
/// value must pass the mode's rule. `created` must parse as an RFC 3339
/// timestamp, a civil datetime or a civil date.
///
/// # Errors
///
/// Returns an invalid input error carrying the rule's error message; the
/// context names the offending field.
pub fn validate(params: &UpdateParameters) -> Result<()> {
    let table = document_update();

    field(table, &["id"])?
        .validate_locator(&params.id)
        .map_err(|error| error.with_context("id"))?;

    let fields = &params.update_fields;
    for (name, locator) in fields.locators() {
        let path = match name {
            "custom_fields" => vec!["update_fields", "custom_fields", "values", "field"],
            "tags" => vec!["update_fields", "tags", "values", "tag"],
            _ => vec!["update_fields", name],
        };

        field(table, &path)?
            .validate_locator(locator)
            .map_err(|error| error.with_context(format!("update_fields.{name}")))?;
    }

    if let Some(created) = fields.created.as_deref()
        && !is_datetime(created)
    {
        return Err(Error::invalid_input()
            .with_message(format!("'{created}' is not a valid date and time"))
            .with_context("update_fields.created"));
    }

    Ok(())
}

/// Walks nested options of a parameter table by name.
fn field(table: &'static [FieldDescriptor], path: &[&str]) -> Result<&'static FieldDescriptor> {
    let missing = || Error::internal_error().with_message(format!("No field '{}'", path.join(".")));

    let (first, rest) = path.split_first().ok_or_else(missing)?;
    let mut current = table
        .iter()
        .find(|field| field.name == *first)
        .ok_or_else(missing)?;

    for name in rest {
        current = current.option(name).ok_or_else(missing)?;
    }

    Ok(current)
}

fn is_datetime(input: &str) -> bool {
    input.parse::<Timestamp>().is_ok()
        || input.parse::<DateTime>().is_ok()
        || input.parse::<Date>().is_ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;
    use crate::locator::{ID_ERROR_MESSAGE, URL_ERROR_MESSAGE};

    fn params(value: serde_json::Value) -> UpdateParameters {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_accepts_valid_input() {
        let params = params(json!({
            "id": {"mode": "url", "value": "https://paperless.example.com/documents/123/details"},
            "update_fields": {
                "created": "2024-05-01T08:30:00+02:00",
                "correspondent": {"mode": "id", "value": "4"},
                "tags": {"values": [{"tag": {"mode": "list", "value": "anything"}}]}
            }
        }));
        assert!(validate(&params).is_ok());
    }

    #[test]
    fn test_rejects_bad_id() {
        for bad in ["0", "042", "abc", "1.5", ""] {
            let params = params(json!({"id": {"mode": "id", "value": bad}}));
            let error = validate(&params).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::InvalidInput);
            assert_eq!(error.message.as_deref(), Some(ID_ERROR_MESSAGE));
            assert_eq!(error.context.as_deref(), Some("id"));
        }
    }

    #[test]
    fn test_rejects_bad_url() {
        let params = params(json!({
            "id": {"mode": "url", "value": "https://paperless.example.com/documents/abc/details"}
        }));
        let error = validate(&params).unwrap_err();
        assert_eq!(error.message.as_deref(), Some(URL_ERROR_MESSAGE));
    }

    #[test]
    fn test_rejects_bad_nested_locator() {
        let params = params(json!({
            "id": {"mode": "id", "value": "1"},
            "update_fields": {
                "custom_fields": {"values": [{"field": {"mode": "id", "value": "0"}, "value": "x"}]}
            }
        }));
        let error = validate(&params).unwrap_err();
        assert_eq!(error.context.as_deref(), Some("update_fields.custom_fields"));
    }

    #[test]
    fn test_created_formats() {
        for created in ["2024-05-01", "2024-05-01T08:30:00", "2024-05-01T08:30:00Z"] {
            let params = params(json!({
                "id": {"mode": "id", "value": "1"},
                "update_fields": {"created": created}
            }));
            assert!(validate(&params).is_ok(), "{created}");
        }

        let params = params(json!({
            "id": {"mode": "id", "value": "1"},
            "update_fields": {"created": "yesterday"}
        }));
        assert!(validate(&params).is_err());
    }

    #[test]
    fn test_rejects_url_on_fields_without_url_mode() {
        let url = "https://p.example.com/documents/55/details";
        let cases = [
            ("correspondent", json!({"correspondent": {"mode": "url", "value": url}})),
            ("document_type", json!({"document_type": {"mode": "url", "value": url}})),
            ("storage_path", json!({"storage_path": {"mode": "url", "value": url}})),
            ("tags", json!({"tags": {"values": [{"tag": {"mode": "url", "value": url}}]}})),
            (
                "custom_fields",
                json!({"custom_fields": {"values": [{"field": {"mode": "url", "value": url}}]}}),
            ),
        ];

        for (name, update_fields) in cases {
            let params = params(json!({
                "id": {"mode": "id", "value": "1"},
                "update_fields": update_fields
            }));
            let error = validate(&params).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::InvalidInput, "{name}");
            assert_eq!(
                error.context.as_deref(),
                Some(format!("update_fields.{name}").as_str())
            );
        }
    }

    #[test]
    fn test_field_lookup() {
        let table = document_update();
        assert_eq!(field(table, &["update_fields", "tags", "values", "tag"]).unwrap().name, "tag");
        assert_eq!(
            field(table, &["update_fields", "nope"]).unwrap_err().kind(),
            ErrorKind::InternalError
        );
    }
}
