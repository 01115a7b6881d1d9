//! Collaborator traits consumed by the orchestrator.
//!
//! Narrow contracts over the three external systems. The connector
//! crates implement these; tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{InventoryRecord, RemoteFile, SourceDetails, SourceHandle};

/// Listing and download access to the remote document folder.
#[async_trait]
pub trait RemoteFolder: Send + Sync {
    /// Lists every file currently in the configured folder.
    async fn list(&self) -> CoreResult<Vec<RemoteFile>>;

    /// Downloads the raw content of a file by its remote identifier.
    async fn download(&self, file_id: &str) -> CoreResult<Vec<u8>>;
}

/// The asynchronous ingestion service behind the notebook.
#[async_trait]
pub trait IngestionService: Send + Sync {
    /// Uploads raw file content to start asynchronous processing.
    ///
    /// Returns a handle for the pending source. Acceptance of the upload
    /// says nothing about whether processing will succeed.
    async fn create_source(&self, content: &[u8], file_name: &str) -> CoreResult<SourceHandle>;

    /// Fetches the current details of a source by its identifier.
    ///
    /// Returns `Ok(None)` when the source is not yet visible, which the
    /// poll loop treats as "still processing".
    async fn get_source(&self, source_id: &str) -> CoreResult<Option<SourceDetails>>;

    /// Deletes a source by its full resource name.
    async fn delete_source(&self, resource_name: &str) -> CoreResult<()>;
}

/// Durable record of which remote files have already been ingested.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Fetches every record in the inventory.
    async fn get_all(&self) -> CoreResult<Vec<InventoryRecord>>;

    /// Upserts a record keyed by its display name (full overwrite).
    async fn put(&self, record: &InventoryRecord) -> CoreResult<()>;

    /// Deletes the record with the given display name.
    async fn delete(&self, display_name: &str) -> CoreResult<()>;
}
