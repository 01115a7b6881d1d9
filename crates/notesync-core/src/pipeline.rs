//! Upload-and-poll pipeline for a single new file.
//!
//! Moves one remote file through download, upload, asynchronous
//! processing, and the final inventory write, with a bounded wait. Every
//! outcome is terminal for the file and none of them is fatal to the
//! surrounding sync run.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::orchestrator::SyncOptions;
use crate::traits::{IngestionService, InventoryStore, RemoteFolder};
use crate::types::{RemoteFile, SourceStatus};

/// Terminal outcome of ingesting one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestOutcome {
    /// Processing finished and the inventory record was written.
    Complete,
    /// The service reported processing failure, or processing completed
    /// but the inventory record could not be written. Either way no
    /// durable record exists and the next run retries the file.
    Failed,
    /// The poll budget ran out before a terminal status was observed.
    /// The uploaded source is left orphaned on the service side.
    TimedOut,
    /// The file content could not be downloaded; no service-side state
    /// was created.
    DownloadError,
    /// The upload was rejected or returned no usable source id.
    SubmitError,
}

impl IngestOutcome {
    /// Only a completed ingest counts towards the run's created total.
    #[must_use]
    pub fn is_complete(self) -> bool {
        self == Self::Complete
    }
}

/// Runs the full pipeline for one file. Infallible by design: every
/// failure mode collapses into an [`IngestOutcome`] and is reported via
/// logs and the run summary.
pub(crate) async fn ingest_file(
    remote: &dyn RemoteFolder,
    ingestion: &dyn IngestionService,
    inventory: &dyn InventoryStore,
    file: &RemoteFile,
    options: &SyncOptions,
    cancel: &CancellationToken,
) -> IngestOutcome {
    let content = match remote.download(&file.id).await {
        Ok(content) if !content.is_empty() => content,
        Ok(_) => {
            warn!(file = %file.name, "downloaded content was empty, skipping");
            return IngestOutcome::DownloadError;
        }
        Err(err) => {
            warn!(file = %file.name, error = %err, "download failed, skipping");
            return IngestOutcome::DownloadError;
        }
    };

    let handle = match ingestion.create_source(&content, &file.name).await {
        Ok(handle) => handle,
        Err(err) => {
            warn!(file = %file.name, error = %err, "upload failed, skipping");
            return IngestOutcome::SubmitError;
        }
    };

    let Some(source_id) = handle.source_id().map(str::to_string) else {
        warn!(file = %file.name, resource = %handle.name, "upload response had no source id");
        return IngestOutcome::SubmitError;
    };

    info!(
        file = %file.name,
        source_id = %source_id,
        "upload accepted, polling for processing status"
    );

    for attempt in 1..=options.max_poll_attempts {
        debug!(file = %file.name, attempt, max = options.max_poll_attempts, "polling source");

        match ingestion.get_source(&source_id).await {
            Ok(Some(details)) => match details.status {
                SourceStatus::Complete => {
                    // The service may have retitled the source; the
                    // inventory must stay keyed by the remote file name.
                    let record = details.into_record(&file.name);
                    if let Err(err) = inventory.put(&record).await {
                        warn!(file = %file.name, error = %err, "inventory write failed");
                        return IngestOutcome::Failed;
                    }
                    info!(file = %file.name, "source processing complete");
                    return IngestOutcome::Complete;
                }
                SourceStatus::Failed => {
                    warn!(file = %file.name, source_id = %source_id, "source processing failed");
                    return IngestOutcome::Failed;
                }
                status => {
                    debug!(file = %file.name, ?status, "source still processing");
                }
            },
            Ok(None) => {
                debug!(file = %file.name, source_id = %source_id, "source not yet visible");
            }
            Err(err) => {
                warn!(file = %file.name, error = %err, "status fetch failed, will retry");
            }
        }

        if attempt < options.max_poll_attempts {
            tokio::select! {
                () = cancel.cancelled() => {
                    warn!(file = %file.name, resource = %handle.name, "sync cancelled mid-poll");
                    return IngestOutcome::TimedOut;
                }
                () = tokio::time::sleep(options.poll_interval) => {}
            }
        }
    }

    warn!(
        file = %file.name,
        resource = %handle.name,
        "polling timed out; source left orphaned on the service side"
    );
    IngestOutcome::TimedOut
}
