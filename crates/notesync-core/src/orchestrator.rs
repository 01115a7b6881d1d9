//! Reconciliation orchestrator.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::diff::compute_diff;
use crate::error::SyncError;
use crate::pipeline::{ingest_file, IngestOutcome};
use crate::traits::{IngestionService, InventoryStore, RemoteFolder};

/// Tuning knobs for a sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Maximum status fetches per uploaded file.
    pub max_poll_attempts: u32,
    /// Delay between poll attempts.
    pub poll_interval: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            max_poll_attempts: 10,
            poll_interval: Duration::from_secs(6),
        }
    }
}

/// Per-file report for the upload pass.
#[derive(Debug, Clone, Serialize)]
pub struct UploadReport {
    pub file_name: String,
    pub outcome: IngestOutcome,
}

/// Aggregate result of a sync run.
///
/// The HTTP trigger only surfaces the counts; the per-item detail is for
/// logs and callers embedding the orchestrator directly.
#[derive(Debug, Default, Serialize)]
pub struct SyncSummary {
    pub created: usize,
    pub deleted: usize,
    /// One entry per file in the upload set, in processing order.
    pub uploads: Vec<UploadReport>,
    /// Display names whose service-side deletion failed; their records
    /// stay in the inventory and are retried by the next run.
    pub failed_deletions: Vec<String>,
}

/// Drives one reconciliation pass over the three inventories.
///
/// A run assumes it is the only one mutating the inventory; no locking
/// is provided. Per-file pipelines execute strictly one after another.
/// There is no run-level transaction: a crash mid-run leaves a partially
/// reconciled state that the next run's diff repairs naturally.
pub struct SyncOrchestrator {
    remote: Arc<dyn RemoteFolder>,
    ingestion: Arc<dyn IngestionService>,
    inventory: Arc<dyn InventoryStore>,
    options: SyncOptions,
    cancel: CancellationToken,
}

impl SyncOrchestrator {
    pub fn new(
        remote: Arc<dyn RemoteFolder>,
        ingestion: Arc<dyn IngestionService>,
        inventory: Arc<dyn InventoryStore>,
        options: SyncOptions,
    ) -> Self {
        Self {
            remote,
            ingestion,
            inventory,
            options,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that aborts in-flight poll loops when cancelled. In-progress
    /// files finish as timed out and are retried by the next run.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Executes one full sync run.
    ///
    /// # Errors
    ///
    /// Fails only when the initial fetch of the remote listing or the
    /// inventory fails; every per-item failure is folded into the
    /// returned [`SyncSummary`].
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<SyncSummary, SyncError> {
        info!("sync run started");

        let remote_files = self
            .remote
            .list()
            .await
            .map_err(SyncError::FetchState)?;
        let records = self
            .inventory
            .get_all()
            .await
            .map_err(SyncError::FetchState)?;

        info!(
            remote_files = remote_files.len(),
            inventory_records = records.len(),
            "initial state fetched"
        );

        let diff = compute_diff(&remote_files, &records);
        let mut summary = SyncSummary::default();

        // Deletions first, so a rename (delete + upload of the same
        // content under a new name) never races its own record.
        for record in &diff.to_delete {
            info!(display_name = %record.display_name, "deleting obsolete source");
            match self.ingestion.delete_source(&record.name).await {
                Ok(()) => {
                    if let Err(err) = self.inventory.delete(&record.display_name).await {
                        warn!(
                            display_name = %record.display_name,
                            error = %err,
                            "inventory delete failed; record will be retried next run"
                        );
                        summary.failed_deletions.push(record.display_name.clone());
                        continue;
                    }
                    summary.deleted += 1;
                }
                Err(err) => {
                    // Leave the record in place so the next run retries.
                    warn!(
                        display_name = %record.display_name,
                        error = %err,
                        "service-side delete failed, keeping inventory record"
                    );
                    summary.failed_deletions.push(record.display_name.clone());
                }
            }
        }

        for file in &diff.to_upload {
            info!(file = %file.name, "ingesting new file");
            let outcome = ingest_file(
                self.remote.as_ref(),
                self.ingestion.as_ref(),
                self.inventory.as_ref(),
                file,
                &self.options,
                &self.cancel,
            )
            .await;

            if outcome.is_complete() {
                summary.created += 1;
            }
            summary.uploads.push(UploadReport {
                file_name: file.name.clone(),
                outcome,
            });
        }

        info!(
            created = summary.created,
            deleted = summary.deleted,
            "sync run finished"
        );
        Ok(summary)
    }
}
