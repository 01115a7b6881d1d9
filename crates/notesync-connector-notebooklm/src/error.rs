//! Error types for the NotebookLM connector.

use thiserror::Error;

/// Result type alias using `NotebookLmError`.
pub type NotebookLmResult<T> = Result<T, NotebookLmError>;

/// Errors that can occur when talking to the notebook API.
#[derive(Debug, Error)]
pub enum NotebookLmError {
    /// Configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Delegated-credential acquisition error.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Notebook API returned a failure status.
    #[error("Notebook API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The upload was accepted but the response carried no source id.
    #[error("Upload response contained no source id")]
    MissingSourceId,

    /// A required field was absent from a service response.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<NotebookLmError> for notesync_core::CoreError {
    fn from(err: NotebookLmError) -> Self {
        match err {
            NotebookLmError::MissingSourceId => notesync_core::CoreError::MissingSourceId,
            other => notesync_core::CoreError::upstream(other),
        }
    }
}
