//! Error types for the SharePoint connector.

use thiserror::Error;

/// Result type alias using `SharePointError`.
pub type SharePointResult<T> = Result<T, SharePointError>;

/// Errors that can occur when talking to Microsoft Graph.
#[derive(Debug, Error)]
pub enum SharePointError {
    /// Configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// `OAuth2` authentication error.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Microsoft Graph API error.
    #[error("Graph API error: {code} - {message}")]
    Graph { code: String, message: String },

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<SharePointError> for notesync_core::CoreError {
    fn from(err: SharePointError) -> Self {
        notesync_core::CoreError::upstream(err)
    }
}
