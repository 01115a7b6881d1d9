//! SharePoint connector for notesync
//!
//! Implements the [`notesync_core::RemoteFolder`] trait against a
//! SharePoint document-library folder via the Microsoft Graph API.
//!
//! # Features
//!
//! - `OAuth2` client credentials authentication with token caching
//! - Folder listing with `@odata.nextLink` pagination
//! - Raw content download by drive item id
//!
//! # Example
//!
//! ```no_run
//! use notesync_connector_sharepoint::{
//!     SharePointClient, SharePointConfig, SharePointCredentials,
//! };
//! use notesync_core::RemoteFolder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SharePointConfig::new("tenant-id", "drive-id", "folder-id");
//! let credentials = SharePointCredentials {
//!     client_id: "client-id".to_string(),
//!     client_secret: "client-secret".to_string().into(),
//! };
//!
//! let client = SharePointClient::new(config, credentials)?;
//! let files = client.list().await?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod config;
mod error;

pub use auth::TokenCache;
pub use client::SharePointClient;
pub use config::{SharePointConfig, SharePointCredentials};
pub use error::{SharePointError, SharePointResult};
