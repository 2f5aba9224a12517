//! Raw parameter values for a document update, as supplied by the host.

use serde::{Deserialize, Serialize};

use crate::locator::ResourceLocator;

/// Parameters of one `document` / `update` invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateParameters {
    /// Document to update.
    pub id: ResourceLocator,
    /// Optional fields to change; an absent bag changes nothing.
    #[serde(default)]
    pub update_fields: UpdateFields,
}

impl UpdateParameters {
    /// Creates parameters for the given document with an empty fields bag.
    pub fn new(id: ResourceLocator) -> Self {
        Self {
            id,
            update_fields: UpdateFields::default(),
        }
    }

    /// Sets the fields bag.
    pub fn with_fields(mut self, update_fields: UpdateFields) -> Self {
        self.update_fields = update_fields;
        self
    }
}

/// Optional-fields collection of a document update.
///
/// Every field is independently present or absent. Absent fields never reach
/// the outgoing payload, so Paperless leaves them unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateFields {
    /// Union new tags with the existing ones instead of replacing them.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub append_tags: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_serial_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correspondent: Option<ResourceLocator>,
    /// Creation date as entered by the host (RFC 3339 or civil date/time).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<FixedCollection<CustomFieldEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<ResourceLocator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<ResourceLocator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<FixedCollection<TagEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl UpdateFields {
    /// Returns every locator in the bag, labelled with its field name.
    pub fn locators(&self) -> impl Iterator<Item = (&'static str, &ResourceLocator)> {
        let single = [
            ("correspondent", self.correspondent.as_ref()),
            ("document_type", self.document_type.as_ref()),
            ("storage_path", self.storage_path.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, locator)| locator.map(|locator| (name, locator)));

        let custom_fields = self
            .custom_fields
            .iter()
            .flat_map(FixedCollection::entries)
            .map(|entry| ("custom_fields", &entry.field));

        let tags = self
            .tags
            .iter()
            .flat_map(FixedCollection::entries)
            .map(|entry| ("tags", &entry.tag));

        single.chain(custom_fields).chain(tags)
    }
}

/// Repeatable group of values, shaped `{"values": [...]}`.
///
/// A collection without a `values` key carries no entries and is treated
/// like an absent field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedCollection<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<T>>,
}

impl<T> FixedCollection<T> {
    /// Creates a collection holding the given entries.
    pub fn new(values: Vec<T>) -> Self {
        Self {
            values: Some(values),
        }
    }

    /// Returns the entries, or an empty slice when none were given.
    pub fn entries(&self) -> &[T] {
        self.values.as_deref().unwrap_or_default()
    }
}

impl<T> Default for FixedCollection<T> {
    fn default() -> Self {
        Self { values: None }
    }
}

impl<T> FromIterator<T> for FixedCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// One entry of the `custom_fields` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldEntry {
    /// Custom field definition.
    pub field: ResourceLocator,
    /// Value to store for this document.
    #[serde(default)]
    pub value: String,
}

impl CustomFieldEntry {
    pub fn new(field: ResourceLocator, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// One entry of the `tags` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagEntry {
    pub tag: ResourceLocator,
}

impl From<ResourceLocator> for TagEntry {
    fn from(tag: ResourceLocator) -> Self {
        Self { tag }
    }
}
