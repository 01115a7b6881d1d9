//! Data model shared between the orchestrator and the connector crates.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A file as listed in the remote document folder.
///
/// Ephemeral: fetched fresh on every sync run and never persisted. The
/// `id` is the remote store's identity; the `name` is the reconciliation
/// key joined against [`InventoryRecord::display_name`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteFile {
    pub id: String,
    pub name: String,
    /// Listing metadata we do not interpret (size, timestamps, etag, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RemoteFile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }
}

/// Processing state of an ingestion-service source.
///
/// The wire vocabulary belongs to the service; anything we do not
/// recognize deserializes as [`SourceStatus::Unknown`] and is treated as
/// "still processing" by the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceStatus {
    #[serde(rename = "SOURCE_STATUS_PROCESSING")]
    Processing,
    #[serde(rename = "SOURCE_STATUS_COMPLETE")]
    Complete,
    #[serde(rename = "SOURCE_STATUS_FAILED")]
    Failed,
    #[serde(other, rename = "SOURCE_STATUS_UNSPECIFIED")]
    Unknown,
}

impl SourceStatus {
    /// Terminal statuses end the poll loop for their source.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

/// Handle returned synchronously when the ingestion service accepts an
/// upload. Represents a pending, not-yet-processed source; it lives only
/// for the duration of the poll loop and is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceHandle {
    /// Full resource path, ending in the source identifier.
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl SourceHandle {
    /// The trailing path segment of the resource name, used to poll for
    /// processing status.
    #[must_use]
    pub fn source_id(&self) -> Option<&str> {
        self.name.rsplit('/').find(|s| !s.is_empty())
    }
}

/// Full source details as reported by the ingestion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDetails {
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub status: SourceStatus,
    /// Service metadata we carry through to the inventory untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SourceDetails {
    /// Converts into an inventory record, forcing the display name to the
    /// given reconciliation key. The service may report its own title for
    /// a source; the inventory must be keyed by the remote file name that
    /// produced it.
    #[must_use]
    pub fn into_record(self, display_name: impl Into<String>) -> InventoryRecord {
        InventoryRecord {
            name: self.name,
            display_name: display_name.into(),
            status: self.status,
            extra: self.extra,
        }
    }
}

/// Durable record of a source that has been ingested successfully.
///
/// `display_name` is unique within the store and equals the name of the
/// remote file that produced the record. Records are written once, never
/// mutated, and deleted when their file vanishes from the remote folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Full resource name in the ingestion service.
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub status: SourceStatus,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InventoryRecord {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        status: SourceStatus,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            status,
            extra: Map::new(),
        }
    }
}
