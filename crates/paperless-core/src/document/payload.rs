//! Partial-update request body.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{FixedCollection, UpdateFields};
use crate::locator::{ResourceLocator, coerce_id};
use crate::{Error, Result};

/// Normalized body of a `PATCH /documents/{id}/` request.
///
/// Locator fields hold their bare resolved value. Every field is omitted from
/// the serialized JSON when absent, never sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_serial_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correspondent: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<CustomFieldValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A `{field, value}` pair of the `custom_fields` payload entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldValue {
    pub field: Value,
    pub value: String,
}

impl UpdatePayload {
    /// Builds the payload from a fields bag, copying only present fields.
    ///
    /// Tags are reduced to numeric IDs but not merged; see [`merge_tags`].
    ///
    /// # Errors
    ///
    /// Returns an invalid input error if a locator cannot be resolved or a
    /// tag value is not numeric.
    pub fn from_fields(fields: &UpdateFields) -> Result<Self> {
        let custom_fields = fields
            .custom_fields
            .as_ref()
            .and_then(|collection| collection.values.as_ref())
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| {
                        Ok(CustomFieldValue {
                            field: entry.field.resolve()?,
                            value: entry.value.clone(),
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        Ok(Self {
            archive_serial_number: fields.archive_serial_number,
            correspondent: resolve(fields.correspondent.as_ref())?,
            created: fields.created.clone(),
            custom_fields,
            document_type: resolve(fields.document_type.as_ref())?,
            storage_path: resolve(fields.storage_path.as_ref())?,
            tags: tag_ids(fields.tags.as_ref())?,
            title: fields.title.clone(),
        })
    }

    /// Returns whether the payload carries no field at all.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Names of the fields present in this payload.
    pub fn field_names(&self) -> Vec<&'static str> {
        [
            ("archive_serial_number", self.archive_serial_number.is_some()),
            ("correspondent", self.correspondent.is_some()),
            ("created", self.created.is_some()),
            ("custom_fields", self.custom_fields.is_some()),
            ("document_type", self.document_type.is_some()),
            ("storage_path", self.storage_path.is_some()),
            ("tags", self.tags.is_some()),
            ("title", self.title.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }
}

fn resolve(locator: Option<&ResourceLocator>) -> Result<Option<Value>> {
    locator.map(ResourceLocator::resolve).transpose()
}

/// Reduces the tags collection to numeric IDs, keeping input order.
fn tag_ids(tags: Option<&FixedCollection<super::TagEntry>>) -> Result<Option<Vec<u64>>> {
    let Some(entries) = tags.and_then(|collection| collection.values.as_ref()) else {
        return Ok(None);
    };

    entries
        .iter()
        .map(|entry| {
            let value = entry.tag.resolve()?;
            coerce_id(&value).ok_or_else(|| {
                Error::invalid_input()
                    .with_message("Tag IDs must be numeric")
                    .with_context(value.to_string())
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Reads the numeric tag IDs of a document representation.
///
/// A missing or `null` `tags` key means the document has no tags.
///
/// # Errors
///
/// Returns a serialization error if `tags` is not an array of IDs.
pub fn current_tags(document: &Value) -> Result<Vec<u64>> {
    match document.get("tags") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(tags)) => tags
            .iter()
            .map(|tag| {
                coerce_id(tag).ok_or_else(|| {
                    Error::serialization()
                        .with_message("Unexpected tag ID in document response")
                        .with_context(tag.to_string())
                })
            })
            .collect(),
        Some(other) => Err(Error::serialization()
            .with_message("Document response has a non-array tags field")
            .with_context(other.to_string())),
    }
}

/// Set union of existing and new tag IDs.
///
/// Duplicates are removed; the result keeps first-seen order, existing tags
/// first.
pub fn merge_tags(existing: &[u64], new: &[u64]) -> Vec<u64> {
    let mut seen = HashSet::with_capacity(existing.len() + new.len());
    existing
        .iter()
        .chain(new)
        .copied()
        .filter(|tag| seen.insert(*tag))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::document::{CustomFieldEntry, TagEntry};

    fn tags(ids: &[&str]) -> FixedCollection<TagEntry> {
        ids.iter()
            .map(|id| TagEntry::from(ResourceLocator::id(*id)))
            .collect()
    }

    #[test]
    fn test_empty_bag_has_no_keys() {
        let payload = UpdatePayload::from_fields(&UpdateFields::default()).unwrap();
        assert!(payload.is_empty());
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({}));
    }

    #[test]
    fn test_append_flag_alone_sends_nothing() {
        let fields = UpdateFields {
            append_tags: true,
            ..Default::default()
        };
        let payload = UpdatePayload::from_fields(&fields).unwrap();
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({}));
    }

    #[test]
    fn test_custom_fields_reduction() {
        let fields = UpdateFields {
            custom_fields: Some(FixedCollection::new(vec![CustomFieldEntry::new(
                ResourceLocator::list(7),
                "x",
            )])),
            ..Default::default()
        };
        let payload = UpdatePayload::from_fields(&fields).unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"custom_fields": [{"field": 7, "value": "x"}]})
        );
    }

    #[test]
    fn test_present_fields_round_trip() {
        let fields: UpdateFields = serde_json::from_value(json!({
            "archive_serial_number": 1001,
            "correspondent": {"mode": "id", "value": "5"},
            "created": "2024-03-01T10:00:00Z",
            "document_type": {"mode": "list", "value": 2},
            "storage_path": {"mode": "list", "value": "8"},
            "tags": {"values": [{"tag": {"mode": "list", "value": "11"}}, {"tag": {"value": 12}}]},
            "title": "Quarterly report"
        }))
        .unwrap();

        let payload = UpdatePayload::from_fields(&fields).unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "archive_serial_number": 1001,
                "correspondent": "5",
                "created": "2024-03-01T10:00:00Z",
                "document_type": 2,
                "storage_path": "8",
                "tags": [11, 12],
                "title": "Quarterly report"
            })
        );
        assert_eq!(payload.field_names().len(), 7);
    }

    #[test]
    fn test_tags_keep_input_order() {
        let fields = UpdateFields {
            tags: Some(tags(&["9", "3", "9"])),
            ..Default::default()
        };
        let payload = UpdatePayload::from_fields(&fields).unwrap();
        assert_eq!(payload.tags, Some(vec![9, 3, 9]));
    }

    #[test]
    fn test_empty_tag_values_replace_with_empty_list() {
        let fields = UpdateFields {
            tags: Some(FixedCollection::new(Vec::new())),
            ..Default::default()
        };
        let payload = UpdatePayload::from_fields(&fields).unwrap();
        assert_eq!(payload.tags, Some(Vec::new()));
    }

    #[test]
    fn test_tags_without_values_are_absent() {
        let fields = UpdateFields {
            tags: Some(FixedCollection::default()),
            ..Default::default()
        };
        let payload = UpdatePayload::from_fields(&fields).unwrap();
        assert!(payload.tags.is_none());
    }

    #[test]
    fn test_non_numeric_tag_is_rejected() {
        let fields = UpdateFields {
            tags: Some(FixedCollection::new(vec![TagEntry::from(ResourceLocator::list(
                "inbox",
            ))])),
            ..Default::default()
        };
        let error = UpdatePayload::from_fields(&fields).unwrap_err();
        assert_eq!(error.kind(), crate::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_current_tags() {
        assert_eq!(current_tags(&json!({"tags": [1, "2", 3]})).unwrap(), [1, 2, 3]);
        assert!(current_tags(&json!({"id": 4})).unwrap().is_empty());
        assert!(current_tags(&json!({"tags": null})).unwrap().is_empty());
        assert!(current_tags(&json!({"tags": "1,2"})).is_err());
        assert!(current_tags(&json!({"tags": [{"id": 1}]})).is_err());
    }

    #[test]
    fn test_merge_tags_is_union() {
        let merged = merge_tags(&[1, 2, 3], &[3, 4]);
        assert_eq!(merged, [1, 2, 3, 4]);

        assert_eq!(merge_tags(&[], &[5, 5]), [5]);
        assert_eq!(merge_tags(&[2, 1], &[]), [2, 1]);
    }
}
