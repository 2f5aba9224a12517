//! The `document` / `update` executor.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::UpdateParameters;
use super::payload::{UpdatePayload, current_tags, merge_tags};
use super::TRACING_TARGET;
use crate::provider::{ApiRequest, PaperlessService};
use crate::{Error, Result};

/// Per-item output handed back to the host: `{"json": {"results": [...]}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionData {
    pub json: ResultEnvelope,
}

impl ExecutionData {
    /// Wraps a single raw response.
    pub fn new(response: Value) -> Self {
        Self {
            json: ResultEnvelope {
                results: vec![response],
            },
        }
    }
}

/// Single-element wrapper around the raw response of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub results: Vec<Value>,
}

/// Returns the endpoint of a document, e.g. `/documents/42/`.
///
/// # Errors
///
/// Returns an invalid input error if the identifier is neither a non-empty
/// string nor a number.
pub fn document_endpoint(id: &Value) -> Result<String> {
    match id {
        Value::String(id) if !id.trim().is_empty() => Ok(format!("/documents/{}/", id.trim())),
        Value::Number(id) => Ok(format!("/documents/{id}/")),
        other => Err(Error::invalid_input()
            .with_message("A document ID is required")
            .with_context(other.to_string())),
    }
}

/// Updates one document.
///
/// Builds the partial-update payload from the fields bag and sends it with
/// `PATCH`. When `append_tags` is set and tags were given, the current
/// document is read first and its tags are unioned with the new ones.
///
/// # Errors
///
/// Input errors are reported before any request is sent. Failures of the
/// read or the update request are returned unchanged.
pub async fn execute(service: &PaperlessService, params: &UpdateParameters) -> Result<ExecutionData> {
    let id = params.id.resolve()?;
    let endpoint = document_endpoint(&id)?;
    let fields = &params.update_fields;
    let mut payload = UpdatePayload::from_fields(fields)?;

    if fields.append_tags
        && let Some(tags) = payload.tags.as_deref().filter(|tags| !tags.is_empty())
    {
        let document = service.request(&ApiRequest::get(&endpoint)).await?;
        let existing = current_tags(&document)?;
        let merged = merge_tags(&existing, tags);

        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %endpoint,
            existing = existing.len(),
            requested = tags.len(),
            merged = merged.len(),
            "Appending tags to existing ones"
        );

        payload.tags = Some(merged);
    }

    tracing::info!(
        target: TRACING_TARGET,
        endpoint = %endpoint,
        fields = ?payload.field_names(),
        "Updating document"
    );

    let body = serde_json::to_value(&payload)?;
    let response = service.request(&ApiRequest::patch(endpoint, body)).await?;

    Ok(ExecutionData::new(response))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;
    use crate::document::{CustomFieldEntry, FixedCollection, TagEntry, UpdateFields};
    use crate::locator::ResourceLocator;
    use crate::mock::MockProvider;
    use crate::provider::Method;

    fn tags(ids: &[&str]) -> Option<FixedCollection<TagEntry>> {
        Some(
            ids.iter()
                .map(|id| TagEntry::from(ResourceLocator::id(*id)))
                .collect(),
        )
    }

    fn document_42(fields: UpdateFields) -> UpdateParameters {
        UpdateParameters::new(ResourceLocator::id("42")).with_fields(fields)
    }

    #[tokio::test]
    async fn test_empty_bag_patches_empty_object() {
        let provider = MockProvider::new();
        let service = provider.clone().into_service();

        let data = execute(&service, &document_42(UpdateFields::default()))
            .await
            .unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Patch);
        assert_eq!(requests[0].endpoint, "/documents/42/");
        assert_eq!(requests[0].body, Some(json!({})));
        assert_eq!(data.json.results, [json!({})]);
    }

    #[tokio::test]
    async fn test_replace_tags_without_read() {
        let provider = MockProvider::new();
        let service = provider.clone().into_service();
        let fields = UpdateFields {
            tags: tags(&["3", "4"]),
            ..Default::default()
        };

        execute(&service, &document_42(fields)).await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body, Some(json!({"tags": [3, 4]})));
    }

    #[tokio::test]
    async fn test_append_tags_reads_then_merges() {
        let provider = MockProvider::new().with_response(
            Method::Get,
            "/documents/42/",
            json!({"id": 42, "tags": [1, 2, 3]}),
        );
        let service = provider.clone().into_service();
        let fields = UpdateFields {
            append_tags: true,
            tags: tags(&["3", "4"]),
            ..Default::default()
        };

        execute(&service, &document_42(fields)).await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].endpoint, "/documents/42/");
        assert_eq!(requests[1].method, Method::Patch);

        let body = requests[1].body.as_ref().unwrap();
        let mut merged: Vec<u64> = serde_json::from_value(body["tags"].clone()).unwrap();
        merged.sort_unstable();
        assert_eq!(merged, [1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_append_without_tags_skips_read() {
        let provider = MockProvider::new();
        let service = provider.clone().into_service();
        let fields = UpdateFields {
            append_tags: true,
            tags: Some(FixedCollection::new(Vec::new())),
            title: Some("Renamed".into()),
            ..Default::default()
        };

        execute(&service, &document_42(fields)).await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Patch);
        assert_eq!(
            requests[0].body,
            Some(json!({"tags": [], "title": "Renamed"}))
        );
    }

    #[tokio::test]
    async fn test_document_without_tags_field() {
        let provider =
            MockProvider::new().with_response(Method::Get, "/documents/42/", json!({"id": 42}));
        let service = provider.clone().into_service();
        let fields = UpdateFields {
            append_tags: true,
            tags: tags(&["5"]),
            ..Default::default()
        };

        execute(&service, &document_42(fields)).await.unwrap();
        assert_eq!(provider.requests()[1].body, Some(json!({"tags": [5]})));
    }

    #[tokio::test]
    async fn test_url_locator_targets_extracted_id() {
        let provider = MockProvider::new();
        let service = provider.clone().into_service();
        let params = UpdateParameters::new(ResourceLocator::url(
            "https://paperless.example.com/documents/123/details",
        ));

        execute(&service, &params).await.unwrap();
        assert_eq!(provider.requests()[0].endpoint, "/documents/123/");
    }

    #[tokio::test]
    async fn test_custom_fields_and_locators_are_reduced() {
        let provider = MockProvider::new();
        let service = provider.clone().into_service();
        let fields = UpdateFields {
            correspondent: Some(ResourceLocator::list(9)),
            custom_fields: Some(FixedCollection::new(vec![CustomFieldEntry::new(
                ResourceLocator::list(7),
                "x",
            )])),
            ..Default::default()
        };

        execute(&service, &document_42(fields)).await.unwrap();
        assert_eq!(
            provider.requests()[0].body,
            Some(json!({"correspondent": 9, "custom_fields": [{"field": 7, "value": "x"}]}))
        );
    }

    #[tokio::test]
    async fn test_read_failure_aborts_before_update() {
        let provider = MockProvider::new().with_failure(
            Method::Get,
            "/documents/42/",
            ErrorKind::Authentication,
        );
        let service = provider.clone().into_service();
        let fields = UpdateFields {
            append_tags: true,
            tags: tags(&["1"]),
            ..Default::default()
        };

        let error = execute(&service, &document_42(fields)).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Authentication);
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_update_failure_propagates() {
        let provider = MockProvider::new().with_failure(
            Method::Patch,
            "/documents/42/",
            ErrorKind::NotFound,
        );
        let service = provider.clone().into_service();

        let error = execute(&service, &document_42(UpdateFields::default()))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_invalid_input_sends_nothing() {
        let provider = MockProvider::new();
        let service = provider.clone().into_service();
        let params = UpdateParameters::new(ResourceLocator::url("https://example.com/nope"));

        let error = execute(&service, &params).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        assert!(provider.requests().is_empty());
    }

    #[test]
    fn test_document_endpoint() {
        assert_eq!(document_endpoint(&json!("42")).unwrap(), "/documents/42/");
        assert_eq!(document_endpoint(&json!(7)).unwrap(), "/documents/7/");
        assert!(document_endpoint(&json!("")).is_err());
        assert!(document_endpoint(&json!(null)).is_err());
    }

    #[test]
    fn test_execution_data_shape() {
        let data = ExecutionData::new(json!({"id": 1}));
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"json": {"results": [{"id": 1}]}})
        );
    }
}
