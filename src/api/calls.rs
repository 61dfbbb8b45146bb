//! Call record operations against the backend REST surface.

use crate::types::CallRecord;

use super::{read_json, ApiClient, ApiError};

impl ApiClient {
    /// Upload one audio file as a single-part `file` field.
    ///
    /// Returns the newly created record; its analysis may still be partial
    /// while the backend transcribes. Failures propagate uninterpreted.
    pub async fn upload_call(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<CallRecord, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .http()
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await?;
        read_json(response).await
    }

    /// Fetch the ordered call list, optionally filtered by tag (the backend
    /// matches both system and custom tags).
    ///
    /// Swallows every failure into an empty list: the dashboard shell must
    /// always render, even with the backend unreachable.
    pub async fn list_calls(&self, tag: Option<&str>) -> Vec<CallRecord> {
        match self.fetch_calls(tag).await {
            Ok(calls) => calls,
            Err(e) => {
                log::warn!("Call list fetch failed, rendering empty list: {e}");
                Vec::new()
            }
        }
    }

    async fn fetch_calls(&self, tag: Option<&str>) -> Result<Vec<CallRecord>, ApiError> {
        let mut request = self.http().get(self.url("/calls"));
        if let Some(tag) = tag {
            request = request.query(&[("tag", tag)]);
        }
        let response = request.send().await?;
        read_json(response).await
    }

    /// Fetch a single record. A missing id is a distinct, renderable state.
    pub async fn get_call(&self, id: i64) -> Result<CallRecord, ApiError> {
        let response = self
            .http()
            .get(self.url(&format!("/calls/{id}")))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id));
        }
        read_json(response).await
    }

    /// Replace a record's custom tags server-side.
    ///
    /// Returns the full updated record, not just the tag field, so the
    /// caller can reconcile any other server-side drift.
    pub async fn update_tags(
        &self,
        id: i64,
        custom_tags: &[String],
    ) -> Result<CallRecord, ApiError> {
        let response = self
            .http()
            .patch(self.url(&format!("/calls/{id}/tags")))
            .json(&serde_json::json!({ "custom_tags": custom_tags }))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id));
        }
        read_json(response).await
    }

    /// Downloadable-export locator for a record. Pure string construction,
    /// no network call: the webview opens it as a browser download.
    pub fn export_link(&self, id: i64) -> String {
        self.url(&format!("/calls/{id}/export"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on this port; connections are refused immediately.
    const DEAD_BACKEND: &str = "http://127.0.0.1:9";

    #[test]
    fn test_export_link_shape() {
        let client = ApiClient::new("http://localhost:8000");
        assert_eq!(
            client.export_link(12),
            "http://localhost:8000/calls/12/export"
        );
    }

    #[tokio::test]
    async fn test_list_calls_swallows_network_failure() {
        let client = ApiClient::new(DEAD_BACKEND);
        let calls = client.list_calls(None).await;
        assert!(calls.is_empty());
    }

    #[tokio::test]
    async fn test_list_calls_with_filter_swallows_network_failure() {
        let client = ApiClient::new(DEAD_BACKEND);
        let calls = client.list_calls(Some("sales")).await;
        assert!(calls.is_empty());
    }

    #[tokio::test]
    async fn test_get_call_propagates_network_failure() {
        let client = ApiClient::new(DEAD_BACKEND);
        let err = client.get_call(1).await.unwrap_err();
        assert!(matches!(err, ApiError::Http(_)));
    }

    #[tokio::test]
    async fn test_update_tags_propagates_network_failure() {
        let client = ApiClient::new(DEAD_BACKEND);
        let err = client
            .update_tags(1, &["demo".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Http(_)));
    }
}
