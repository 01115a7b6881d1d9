//! Microsoft Graph drive client for folder listing and content download.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

use notesync_core::{CoreResult, RemoteFile, RemoteFolder};

use crate::{SharePointConfig, SharePointCredentials, SharePointError, SharePointResult, TokenCache};

/// `OData` error response from Microsoft Graph.
#[derive(Debug, Deserialize)]
struct ODataError {
    error: ODataErrorBody,
}

#[derive(Debug, Deserialize)]
struct ODataErrorBody {
    code: String,
    message: String,
}

/// Response wrapper for paginated Graph listings.
#[derive(Debug, Deserialize)]
struct ODataPage<T> {
    value: Vec<T>,
    #[serde(rename = "@odata.nextLink")]
    next_link: Option<String>,
}

/// Graph API client scoped to one document-library folder.
#[derive(Debug)]
pub struct SharePointClient {
    http_client: reqwest::Client,
    token_cache: Arc<TokenCache>,
    config: SharePointConfig,
}

impl SharePointClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        config: SharePointConfig,
        credentials: SharePointCredentials,
    ) -> SharePointResult<Self> {
        let token_cache = Arc::new(TokenCache::new(&config, credentials));
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SharePointError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            token_cache,
            config,
        })
    }

    /// Lists every item in the configured folder, following pagination.
    #[instrument(skip(self))]
    pub async fn list_files(&self) -> SharePointResult<Vec<RemoteFile>> {
        let mut url = format!(
            "{}/drives/{}/items/{}/children",
            self.config.api_base(),
            self.config.drive_id,
            self.config.folder_id
        );

        let mut files = Vec::new();
        loop {
            debug!(%url, "listing folder children");
            let token = self.token_cache.get_token().await?;
            let response = self
                .http_client
                .get(&url)
                .bearer_auth(&token)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(graph_error(response).await);
            }

            let page: ODataPage<RemoteFile> = response.json().await?;
            files.extend(page.value);

            match page.next_link {
                Some(next) => url = next,
                None => break,
            }
        }

        debug!(count = files.len(), "folder listing complete");
        Ok(files)
    }

    /// Downloads the raw content of a drive item.
    #[instrument(skip(self))]
    pub async fn download_content(&self, file_id: &str) -> SharePointResult<Vec<u8>> {
        let url = format!(
            "{}/drives/{}/items/{}/content",
            self.config.api_base(),
            self.config.drive_id,
            file_id
        );

        let token = self.token_cache.get_token().await?;
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(graph_error(response).await);
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Reads a failed Graph response into a structured error.
async fn graph_error(response: reqwest::Response) -> SharePointError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if let Ok(odata) = serde_json::from_str::<ODataError>(&body) {
        return SharePointError::Graph {
            code: odata.error.code,
            message: odata.error.message,
        };
    }
    SharePointError::Graph {
        code: status.to_string(),
        message: body,
    }
}

#[async_trait]
impl RemoteFolder for SharePointClient {
    async fn list(&self) -> CoreResult<Vec<RemoteFile>> {
        self.list_files().await.map_err(Into::into)
    }

    async fn download(&self, file_id: &str) -> CoreResult<Vec<u8>> {
        self.download_content(file_id).await.map_err(Into::into)
    }
}
