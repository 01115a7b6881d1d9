//! Error types for the inventory store.

use thiserror::Error;

/// Result type alias using `InventoryError`.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Errors that can occur when talking to Firestore.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential acquisition error.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Firestore returned a failure status.
    #[error("Firestore error ({status}): {body}")]
    Api { status: u16, body: String },

    /// A document could not be decoded into an inventory record.
    #[error("Decode error: {0}")]
    Decode(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<InventoryError> for notesync_core::CoreError {
    fn from(err: InventoryError) -> Self {
        notesync_core::CoreError::upstream(err)
    }
}
