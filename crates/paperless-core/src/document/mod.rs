//! Document update: fields bag, payload construction and executor.

mod fields;
mod payload;
mod update;

pub use fields::{CustomFieldEntry, FixedCollection, TagEntry, UpdateFields, UpdateParameters};
pub use payload::{CustomFieldValue, UpdatePayload, current_tags, merge_tags};
pub use update::{ExecutionData, ResultEnvelope, document_endpoint, execute};

/// Tracing target for document operations.
pub const TRACING_TARGET: &str = "paperless_core::document";
