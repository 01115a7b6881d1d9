//! Domain-wide-delegation token acquisition without key files.
//!
//! The runtime has no private key of its own; signing happens through
//! the IAM Credentials API. Three steps:
//!
//! 1. Discover the runtime service account and its access token via the
//!    metadata server.
//! 2. Ask IAM Credentials to `signJwt` a delegation claim set asserting
//!    the target user as subject.
//! 3. Exchange the signed JWT for a bearer token at the OAuth endpoint.
//!
//! The resulting token is cached until near expiry, so the three-step
//! chain runs once per token lifetime rather than once per API call.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::{NotebookLmConfig, NotebookLmError, NotebookLmResult};

/// Lifetime asserted in the delegation JWT.
const JWT_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Deserialize)]
struct MetadataTokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SignJwtResponse {
    #[serde(rename = "signedJwt")]
    signed_jwt: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
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

/// Provider of delegated user credentials for the notebook API.
#[derive(Debug)]
pub struct DelegatedTokenProvider {
    config: NotebookLmConfig,
    http_client: reqwest::Client,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    grace_period: Duration,
}

impl DelegatedTokenProvider {
    pub fn new(config: NotebookLmConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
            cached_token: Arc::new(RwLock::new(None)),
            grace_period: Duration::minutes(5),
        }
    }

    /// Gets a valid delegated bearer token, refreshing if necessary.
    #[instrument(skip(self), fields(subject = %self.config.impersonated_user))]
    pub async fn get_token(&self) -> NotebookLmResult<String> {
        {
            let cache = self.cached_token.read().await;
            if let Some(ref token) = *cache {
                if !token.is_expired(self.grace_period) {
                    debug!("Using cached delegated token");
                    return Ok(token.access_token.clone());
                }
            }
        }

        debug!("Deriving new delegated token");
        let new_token = self.derive_token().await?;

        {
            let mut cache = self.cached_token.write().await;
            *cache = Some(new_token.clone());
        }

        Ok(new_token.access_token)
    }

    /// Invalidates the cached token, forcing a refresh on next use.
    pub async fn invalidate(&self) {
        let mut cache = self.cached_token.write().await;
        *cache = None;
    }

    async fn derive_token(&self) -> NotebookLmResult<CachedToken> {
        let (sa_email, sa_token) = self.runtime_service_account().await?;
        let signed_jwt = self.sign_delegation_jwt(&sa_email, &sa_token).await?;
        self.exchange_jwt(&signed_jwt).await
    }

    /// Discovers the runtime service account email and an access token
    /// for it from the metadata server.
    async fn runtime_service_account(&self) -> NotebookLmResult<(String, String)> {
        let base = format!(
            "{}/computeMetadata/v1/instance/service-accounts/default",
            self.config.metadata_base_url
        );

        let email = self
            .http_client
            .get(format!("{base}/email"))
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| NotebookLmError::Auth(format!("Metadata server unreachable: {e}")))?
            .error_for_status()
            .map_err(|e| NotebookLmError::Auth(format!("Metadata email lookup failed: {e}")))?
            .text()
            .await
            .map_err(|e| NotebookLmError::Auth(format!("Metadata email read failed: {e}")))?
            .trim()
            .to_string();

        if email.is_empty() {
            return Err(NotebookLmError::Auth(
                "Metadata server returned an empty service account email".to_string(),
            ));
        }

        let token: MetadataTokenResponse = self
            .http_client
            .get(format!("{base}/token"))
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| NotebookLmError::Auth(format!("Metadata token fetch failed: {e}")))?
            .error_for_status()
            .map_err(|e| NotebookLmError::Auth(format!("Metadata token fetch failed: {e}")))?
            .json()
            .await
            .map_err(|e| NotebookLmError::Auth(format!("Metadata token parse failed: {e}")))?;

        Ok((email, token.access_token))
    }

    /// Signs the delegation claim set via the IAM Credentials API.
    async fn sign_delegation_jwt(
        &self,
        sa_email: &str,
        sa_token: &str,
    ) -> NotebookLmResult<String> {
        let now = Utc::now().timestamp();
        let claims = json!({
            "iss": self.config.delegator_email,
            "sub": self.config.impersonated_user,
            "aud": self.config.token_url,
            "iat": now,
            "exp": now + JWT_LIFETIME_SECS,
            "scope": self.config.scopes.join(" "),
        });

        let url = format!(
            "{}/v1/projects/-/serviceAccounts/{}:signJwt",
            self.config.iam_base_url, sa_email
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(sa_token)
            .json(&json!({ "payload": claims.to_string() }))
            .send()
            .await
            .map_err(|e| NotebookLmError::Auth(format!("signJwt request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotebookLmError::Auth(format!(
                "signJwt failed with status {status}: {body}"
            )));
        }

        let signed: SignJwtResponse = response
            .json()
            .await
            .map_err(|e| NotebookLmError::Auth(format!("signJwt parse failed: {e}")))?;
        Ok(signed.signed_jwt)
    }

    /// Exchanges the signed JWT for a delegated bearer token.
    async fn exchange_jwt(&self, signed_jwt: &str) -> NotebookLmResult<CachedToken> {
        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", signed_jwt),
        ];

        let response = self
            .http_client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| NotebookLmError::Auth(format!("Token exchange failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotebookLmError::Auth(format!(
                "Token exchange failed with status {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| NotebookLmError::Auth(format!("Token exchange parse failed: {e}")))?;

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Utc::now() + Duration::seconds(token.expires_in),
        })
    }
}
