//! Firestore REST client implementing the inventory store.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use notesync_core::{CoreResult, InventoryRecord, InventoryStore};

use crate::codec::{fields_to_record, record_to_fields};
use crate::{FirestoreConfig, InventoryError, InventoryResult, MetadataTokenSource};

/// Inventory store backed by one Firestore collection.
///
/// Document ids are the records' display names, so the reconciliation
/// key addresses documents directly.
#[derive(Debug)]
pub struct FirestoreStore {
    http_client: reqwest::Client,
    token_source: Arc<MetadataTokenSource>,
    config: FirestoreConfig,
}

impl FirestoreStore {
    /// Creates a new store.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: FirestoreConfig) -> InventoryResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| InventoryError::Config(format!("Failed to create HTTP client: {e}")))?;

        let token_source = Arc::new(MetadataTokenSource::new(
            &config.metadata_base_url,
            http_client.clone(),
        ));

        Ok(Self {
            http_client,
            token_source,
            config,
        })
    }

    /// Fetches every record in the collection, following pagination.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> InventoryResult<Vec<InventoryRecord>> {
        let mut records = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let token = self.token_source.get_token().await?;
            let mut request = self
                .http_client
                .get(self.config.collection_url())
                .bearer_auth(&token);
            if let Some(ref cursor) = page_token {
                request = request.query(&[("pageToken", cursor)]);
            }

            let response = request.send().await?;
            if !response.status().is_success() {
                return Err(api_error(response).await);
            }

            let body: Value = response.json().await?;
            if let Some(documents) = body.get("documents").and_then(Value::as_array) {
                for document in documents {
                    let Some(fields) = document.get("fields") else {
                        continue;
                    };
                    match fields_to_record(fields) {
                        Ok(record) => records.push(record),
                        Err(err) => {
                            // A malformed document must not poison the
                            // whole listing; it simply stays unmanaged.
                            warn!(
                                document = %document.get("name").and_then(serde_json::Value::as_str).unwrap_or("?"),
                                error = %err,
                                "skipping undecodable inventory document"
                            );
                        }
                    }
                }
            }

            match body.get("nextPageToken").and_then(Value::as_str) {
                Some(next) => page_token = Some(next.to_string()),
                None => break,
            }
        }

        debug!(count = records.len(), "inventory fetched");
        Ok(records)
    }

    /// Upserts a record, overwriting any existing document.
    #[instrument(skip(self, record), fields(display_name = %record.display_name))]
    pub async fn upsert(&self, record: &InventoryRecord) -> InventoryResult<()> {
        let token = self.token_source.get_token().await?;
        let fields = record_to_fields(record)?;

        let response = self
            .http_client
            .patch(self.config.document_url(&record.display_name))
            .bearer_auth(&token)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        info!(display_name = %record.display_name, "inventory record written");
        Ok(())
    }

    /// Removes the document for the given display name.
    #[instrument(skip(self))]
    pub async fn remove(&self, display_name: &str) -> InventoryResult<()> {
        let token = self.token_source.get_token().await?;
        let response = self
            .http_client
            .delete(self.config.document_url(display_name))
            .bearer_auth(&token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        info!(%display_name, "inventory record deleted");
        Ok(())
    }
}

/// Reads a failed Firestore response into a structured error.
async fn api_error(response: reqwest::Response) -> InventoryError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    InventoryError::Api { status, body }
}

#[async_trait]
impl InventoryStore for FirestoreStore {
    async fn get_all(&self) -> CoreResult<Vec<InventoryRecord>> {
        self.fetch_all().await.map_err(Into::into)
    }

    async fn put(&self, record: &InventoryRecord) -> CoreResult<()> {
        self.upsert(record).await.map_err(Into::into)
    }

    async fn delete(&self, display_name: &str) -> CoreResult<()> {
        self.remove(display_name).await.map_err(Into::into)
    }
}
