//! notesync core
//!
//! Reconciliation engine for keeping a NotebookLM-style notebook in step
//! with a remote document folder. The crate owns the data model, the
//! collaborator traits, the three-way diff, and the upload-and-poll
//! pipeline; the HTTP adapters for the concrete services live in the
//! connector crates.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use notesync_core::{SyncOptions, SyncOrchestrator};
//! # async fn example(
//! #     remote: Arc<dyn notesync_core::RemoteFolder>,
//! #     ingestion: Arc<dyn notesync_core::IngestionService>,
//! #     inventory: Arc<dyn notesync_core::InventoryStore>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator =
//!     SyncOrchestrator::new(remote, ingestion, inventory, SyncOptions::default());
//! let summary = orchestrator.run().await?;
//! println!("created {} deleted {}", summary.created, summary.deleted);
//! # Ok(())
//! # }
//! ```

mod diff;
mod error;
mod orchestrator;
mod pipeline;
mod traits;
mod types;

pub use diff::{compute_diff, ReconciliationDiff};
pub use error::{CoreError, CoreResult, SyncError};
pub use orchestrator::{SyncOptions, SyncOrchestrator, SyncSummary, UploadReport};
pub use pipeline::IngestOutcome;
pub use traits::{IngestionService, InventoryStore, RemoteFolder};
pub use types::{InventoryRecord, RemoteFile, SourceDetails, SourceHandle, SourceStatus};
