//! NotebookLM connector for notesync
//!
//! Implements the [`notesync_core::IngestionService`] trait against the
//! NotebookLM Enterprise (Discovery Engine) notebook API.
//!
//! # Features
//!
//! - Domain-wide-delegation auth without key files: runtime service
//!   account discovered via the metadata server, a delegation JWT signed
//!   through the IAM Credentials `signJwt` API, then exchanged for a
//!   bearer token; the resulting token is cached until near expiry
//! - Raw-byte source upload with content type derived from the file name
//! - Source status fetch and batch deletion

mod auth;
mod client;
mod config;
mod error;
mod mime;

pub use auth::DelegatedTokenProvider;
pub use client::NotebookLmClient;
pub use config::NotebookLmConfig;
pub use error::{NotebookLmError, NotebookLmResult};
pub use mime::content_type_for;
