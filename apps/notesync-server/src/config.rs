//! Application configuration loaded from environment variables.
//!
//! Fail-fast: required variables must be present or startup aborts with
//! an error naming the missing variable.

use std::env;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {name}: {reason}")]
    InvalidVar { name: String, reason: String },
}

/// Full application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,

    pub sharepoint_tenant_id: String,
    pub sharepoint_client_id: String,
    pub sharepoint_client_secret: SecretString,
    pub sharepoint_drive_id: String,
    pub sharepoint_folder_id: String,

    pub notebooklm_project_number: String,
    pub notebooklm_location: String,
    pub notebooklm_notebook_id: String,
    pub notebooklm_delegator_email: String,
    pub notebooklm_impersonated_user: String,

    pub firestore_project_id: String,
    pub firestore_collection: String,

    pub max_poll_attempts: u32,
    pub poll_interval: Duration,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok().filter(|v| !v.is_empty()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| ConfigError::MissingVar(name.to_string()))
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: "PORT".to_string(),
                reason: format!("not a port number: {raw}"),
            })?,
            None => 8080,
        };

        let max_poll_attempts = match lookup("SYNC_MAX_POLL_ATTEMPTS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: "SYNC_MAX_POLL_ATTEMPTS".to_string(),
                reason: format!("not a number: {raw}"),
            })?,
            None => 10,
        };

        let poll_interval_secs: u64 = match lookup("SYNC_POLL_INTERVAL_SECS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: "SYNC_POLL_INTERVAL_SECS".to_string(),
                reason: format!("not a number: {raw}"),
            })?,
            None => 6,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,

            sharepoint_tenant_id: required("SHAREPOINT_TENANT_ID")?,
            sharepoint_client_id: required("SHAREPOINT_CLIENT_ID")?,
            sharepoint_client_secret: required("SHAREPOINT_CLIENT_SECRET")?.into(),
            sharepoint_drive_id: required("SHAREPOINT_DRIVE_ID")?,
            sharepoint_folder_id: required("SHAREPOINT_FOLDER_ID")?,

            notebooklm_project_number: required("NOTEBOOKLM_PROJECT_NUMBER")?,
            notebooklm_location: lookup("NOTEBOOKLM_LOCATION")
                .unwrap_or_else(|| "global".to_string()),
            notebooklm_notebook_id: required("NOTEBOOKLM_NOTEBOOK_ID")?,
            notebooklm_delegator_email: required("NOTEBOOKLM_DELEGATOR_EMAIL")?,
            notebooklm_impersonated_user: required("NOTEBOOKLM_IMPERSONATED_USER")?,

            firestore_project_id: required("FIRESTORE_PROJECT_ID")?,
            firestore_collection: lookup("FIRESTORE_COLLECTION")
                .unwrap_or_else(|| "notebooklm_sources".to_string()),

            max_poll_attempts,
            poll_interval: Duration::from_secs(poll_interval_secs),
        })
    }
}
