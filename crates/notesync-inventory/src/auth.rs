//! Runtime service-account credentials from the metadata server.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::{InventoryError, InventoryResult};

#[derive(Debug, Deserialize)]
struct MetadataTokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_expired(&self, grace_period: Duration) -> bool {
        Utc::now() + grace_period >= self.expires_at
    }
}

/// Access-token source for the runtime service account, cached until
/// near expiry.
#[derive(Debug)]
pub struct MetadataTokenSource {
    token_url: String,
    http_client: reqwest::Client,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    grace_period: Duration,
}

impl MetadataTokenSource {
    pub fn new(metadata_base_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            token_url: format!(
                "{metadata_base_url}/computeMetadata/v1/instance/service-accounts/default/token"
            ),
            http_client,
            cached_token: Arc::new(RwLock::new(None)),
            grace_period: Duration::minutes(5),
        }
    }

    /// Gets a valid access token, refreshing if necessary.
    #[instrument(skip(self))]
    pub async fn get_token(&self) -> InventoryResult<String> {
        {
            let cache = self.cached_token.read().await;
            if let Some(ref token) = *cache {
                if !token.is_expired(self.grace_period) {
                    return Ok(token.access_token.clone());
                }
            }
        }

        debug!("Fetching access token from metadata server");
        let response: MetadataTokenResponse = self
            .http_client
            .get(&self.token_url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| InventoryError::Auth(format!("Metadata server unreachable: {e}")))?
            .error_for_status()
            .map_err(|e| InventoryError::Auth(format!("Metadata token fetch failed: {e}")))?
            .json()
            .await
            .map_err(|e| InventoryError::Auth(format!("Metadata token parse failed: {e}")))?;

        let token = CachedToken {
            access_token: response.access_token,
            expires_at: Utc::now() + Duration::seconds(response.expires_in),
        };

        {
            let mut cache = self.cached_token.write().await;
            *cache = Some(token.clone());
        }

        Ok(token.access_token)
    }
}
