//! Parameter table of the `document` / `update` operation.

use super::descriptor::{
    DisplayCondition, DisplayOptions, FieldDescriptor, FieldKind, LocatorModeDescriptor,
    ValidationRule,
};
use crate::locator::{DOCUMENT_URL_PATTERN, ID_ERROR_MESSAGE, ID_PATTERN, URL_ERROR_MESSAGE};

const POSITIVE_INTEGER: ValidationRule = ValidationRule {
    regex: ID_PATTERN,
    error_message: ID_ERROR_MESSAGE,
};

const DOCUMENT_URL: ValidationRule = ValidationRule {
    regex: DOCUMENT_URL_PATTERN,
    error_message: URL_ERROR_MESSAGE,
};

const SHOW_FOR_DOCUMENT_UPDATE: DisplayOptions = DisplayOptions {
    show: &[
        DisplayCondition {
            parameter: "resource",
            values: &["document"],
        },
        DisplayCondition {
            parameter: "operation",
            values: &["update"],
        },
    ],
};

const DOCUMENT_MODES: [LocatorModeDescriptor; 3] = [
    LocatorModeDescriptor::list("Select a Document...", "documentSearch"),
    LocatorModeDescriptor::id("Enter Document ID...", POSITIVE_INTEGER),
    LocatorModeDescriptor::url("Enter Document URL...", DOCUMENT_URL),
];

const CORRESPONDENT_MODES: [LocatorModeDescriptor; 2] = [
    LocatorModeDescriptor::list("Select a Correspondent...", "correspondentSearch"),
    LocatorModeDescriptor::id("Enter Correspondent ID...", POSITIVE_INTEGER),
];

const CUSTOM_FIELD_MODES: [LocatorModeDescriptor; 2] = [
    LocatorModeDescriptor::list("Select a Custom Field...", "customFieldSearch"),
    LocatorModeDescriptor::id("Enter Custom Field ID...", POSITIVE_INTEGER),
];

const DOCUMENT_TYPE_MODES: [LocatorModeDescriptor; 2] = [
    LocatorModeDescriptor::list("Select a Document Type...", "documentTypeSearch"),
    LocatorModeDescriptor::id("Enter Document Type ID...", POSITIVE_INTEGER),
];

const STORAGE_PATH_MODES: [LocatorModeDescriptor; 2] = [
    LocatorModeDescriptor::list("Select a Storage Path...", "storagePathSearch"),
    LocatorModeDescriptor::id("Enter Storage Path ID...", POSITIVE_INTEGER),
];

const TAG_MODES: [LocatorModeDescriptor; 2] = [
    LocatorModeDescriptor::list("Select a Tag...", "tagSearch"),
    LocatorModeDescriptor::id("Enter Tag ID...", POSITIVE_INTEGER),
];

const ID: FieldDescriptor = FieldDescriptor::new("id", "ID", FieldKind::ResourceLocator)
    .with_description("ID of the document")
    .with_hint("The ID of the document")
    .with_placeholder("ID of the document")
    .required()
    .with_display_options(SHOW_FOR_DOCUMENT_UPDATE)
    .with_modes(&DOCUMENT_MODES);

const APPEND_TAGS: FieldDescriptor =
    FieldDescriptor::new("append_tags", "Append Tags", FieldKind::Boolean).with_description(
        "Whether to append the new tags to the existing ones instead of replacing them",
    );

const ARCHIVE_SERIAL_NUMBER: FieldDescriptor =
    FieldDescriptor::new("archive_serial_number", "Archive Serial Number", FieldKind::Number)
        .with_description("The archive serial number of the document");

const CORRESPONDENT: FieldDescriptor =
    FieldDescriptor::new("correspondent", "Correspondent", FieldKind::ResourceLocator)
        .with_description("The correspondent ID of the document")
        .with_modes(&CORRESPONDENT_MODES);

const CREATED: FieldDescriptor = FieldDescriptor::new("created", "Created", FieldKind::DateTime)
    .with_description("The date and time the document was created");

const CUSTOM_FIELD_VALUES: [FieldDescriptor; 2] = [
    FieldDescriptor::new("field", "Field", FieldKind::ResourceLocator)
        .with_description("The custom field ID")
        .with_modes(&CUSTOM_FIELD_MODES),
    FieldDescriptor::new("value", "Value", FieldKind::String)
        .with_description("The custom field value"),
];

const CUSTOM_FIELD_ENTRY: [FieldDescriptor; 1] =
    [FieldDescriptor::new("values", "Custom Field", FieldKind::Group)
        .with_options(&CUSTOM_FIELD_VALUES)];

const CUSTOM_FIELDS: FieldDescriptor =
    FieldDescriptor::new("custom_fields", "Custom Fields", FieldKind::FixedCollection)
        .with_description("The custom field of the document")
        .with_placeholder("Add Custom Field")
        .multiple_values()
        .with_options(&CUSTOM_FIELD_ENTRY);

const DOCUMENT_TYPE: FieldDescriptor =
    FieldDescriptor::new("document_type", "Document Type", FieldKind::ResourceLocator)
        .with_description("The document type ID of the document")
        .with_modes(&DOCUMENT_TYPE_MODES);

const STORAGE_PATH: FieldDescriptor =
    FieldDescriptor::new("storage_path", "Storage Path", FieldKind::ResourceLocator)
        .with_description("The storage path ID of the document")
        .with_modes(&STORAGE_PATH_MODES);

const TAG_VALUES: [FieldDescriptor; 1] =
    [FieldDescriptor::new("tag", "Tag", FieldKind::ResourceLocator)
        .with_description("The tag ID")
        .with_modes(&TAG_MODES)];

const TAG_ENTRY: [FieldDescriptor; 1] =
    [FieldDescriptor::new("values", "Tag", FieldKind::Group).with_options(&TAG_VALUES)];

const TAGS: FieldDescriptor = FieldDescriptor::new("tags", "Tags", FieldKind::FixedCollection)
    .with_description("The tag IDs of the document")
    .with_placeholder("Add Tag")
    .multiple_values()
    .with_options(&TAG_ENTRY);

const TITLE: FieldDescriptor = FieldDescriptor::new("title", "Title", FieldKind::String)
    .with_description("The title of the document");

const UPDATE_FIELD_OPTIONS: [FieldDescriptor; 9] = [
    APPEND_TAGS,
    ARCHIVE_SERIAL_NUMBER,
    CORRESPONDENT,
    CREATED,
    CUSTOM_FIELDS,
    DOCUMENT_TYPE,
    STORAGE_PATH,
    TAGS,
    TITLE,
];

const UPDATE_FIELDS: FieldDescriptor =
    FieldDescriptor::new("update_fields", "Update Fields", FieldKind::Collection)
        .with_hint(
            "All additional fields are automatically added to the document by Paperless if they are not set",
        )
        .with_placeholder("Add Field")
        .with_display_options(SHOW_FOR_DOCUMENT_UPDATE)
        .with_options(&UPDATE_FIELD_OPTIONS);

static DOCUMENT_UPDATE: [FieldDescriptor; 2] = [ID, UPDATE_FIELDS];

/// Returns the parameter table of the `document` / `update` operation.
pub fn document_update() -> &'static [FieldDescriptor] {
    &DOCUMENT_UPDATE
}
