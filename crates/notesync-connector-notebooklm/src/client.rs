//! Notebook source client: upload, status fetch, batch delete.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use notesync_core::{CoreResult, IngestionService, SourceDetails, SourceHandle, SourceStatus};

use crate::mime::content_type_for;
use crate::{DelegatedTokenProvider, NotebookLmConfig, NotebookLmError, NotebookLmResult};

/// Client for one notebook in the Discovery Engine API.
#[derive(Debug)]
pub struct NotebookLmClient {
    http_client: reqwest::Client,
    token_provider: Arc<DelegatedTokenProvider>,
    config: NotebookLmConfig,
}

impl NotebookLmClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: NotebookLmConfig) -> NotebookLmResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| NotebookLmError::Config(format!("Failed to create HTTP client: {e}")))?;

        let token_provider = Arc::new(DelegatedTokenProvider::new(
            config.clone(),
            http_client.clone(),
        ));

        Ok(Self {
            http_client,
            token_provider,
            config,
        })
    }

    /// Uploads raw file content to create a pending source.
    ///
    /// The upload endpoint responds with just a source id; the full
    /// resource name is assembled locally so the poll loop has a handle
    /// to work with.
    #[instrument(skip(self, content), fields(bytes = content.len()))]
    pub async fn upload_source(
        &self,
        content: &[u8],
        file_name: &str,
    ) -> NotebookLmResult<SourceHandle> {
        let token = self.token_provider.get_token().await?;
        let content_type = content_type_for(file_name);

        debug!(%file_name, %content_type, "uploading source");
        let response = self
            .http_client
            .post(self.config.upload_url())
            .bearer_auth(&token)
            .header("Content-Type", content_type)
            .header("X-Goog-Upload-File-Name", file_name)
            .header("X-Goog-Upload-Protocol", "raw")
            .body(content.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: Value = response.json().await?;
        let source_id = body
            .get("sourceId")
            .and_then(|v| v.get("id"))
            .and_then(Value::as_str)
            .ok_or(NotebookLmError::MissingSourceId)?;

        info!(%file_name, %source_id, "source upload accepted");
        Ok(SourceHandle {
            name: self.config.source_name(source_id),
            display_name: file_name.to_string(),
        })
    }

    /// Fetches a source's details, or `None` while it is not yet visible.
    #[instrument(skip(self))]
    pub async fn fetch_source(&self, source_id: &str) -> NotebookLmResult<Option<SourceDetails>> {
        let token = self.token_provider.get_token().await?;
        let response = self
            .http_client
            .get(self.config.source_url(source_id))
            .bearer_auth(&token)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            debug!(%source_id, "source not yet visible");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: Value = response.json().await?;
        parse_source_details(&body).map(Some)
    }

    /// Deletes sources by full resource name via `sources:batchDelete`.
    #[instrument(skip(self))]
    pub async fn batch_delete(&self, resource_names: &[&str]) -> NotebookLmResult<()> {
        let token = self.token_provider.get_token().await?;
        let response = self
            .http_client
            .post(self.config.batch_delete_url())
            .bearer_auth(&token)
            .json(&json!({ "names": resource_names }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        info!(count = resource_names.len(), "sources deleted");
        Ok(())
    }
}

/// Parses the service's source representation into the normalized shape.
///
/// The GET response reports its display name as `title` and nests the
/// processing status under `settings.status`; unknown statuses map to
/// `Unknown` and keep the poll loop waiting.
fn parse_source_details(value: &Value) -> NotebookLmResult<SourceDetails> {
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| NotebookLmError::MalformedResponse("Missing source name".to_string()))?
        .to_string();

    let display_name = value
        .get("title")
        .or_else(|| value.get("displayName"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let status = value
        .get("settings")
        .and_then(|s| s.get("status"))
        .cloned()
        .and_then(|s| serde_json::from_value::<SourceStatus>(s).ok())
        .unwrap_or(SourceStatus::Unknown);

    let extra: Map<String, Value> = value
        .as_object()
        .map(|obj| {
            obj.iter()
                .filter(|(k, _)| k.as_str() != "name" && k.as_str() != "displayName")
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
        .unwrap_or_default();

    Ok(SourceDetails {
        name,
        display_name,
        status,
        extra,
    })
}

#[async_trait]
impl IngestionService for NotebookLmClient {
    async fn create_source(&self, content: &[u8], file_name: &str) -> CoreResult<SourceHandle> {
        self.upload_source(content, file_name).await.map_err(Into::into)
    }

    async fn get_source(&self, source_id: &str) -> CoreResult<Option<SourceDetails>> {
        self.fetch_source(source_id).await.map_err(Into::into)
    }

    async fn delete_source(&self, resource_name: &str) -> CoreResult<()> {
        self.batch_delete(&[resource_name]).await.map_err(Into::into)
    }
}

/// Reads a failed API response into a structured error.
async fn api_error(response: reqwest::Response) -> NotebookLmError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    NotebookLmError::Api { status, body }
}
