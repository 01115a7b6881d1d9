//! Error types for the reconciliation core.

use thiserror::Error;

/// Result type alias used by the collaborator traits.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors surfaced by collaborators at the orchestrator boundary.
///
/// Connector crates keep their own richer error enums; they are reduced
/// to this shape where they cross into the core, since the orchestrator
/// only ever decides "abort the run" or "skip this item".
#[derive(Debug, Error)]
pub enum CoreError {
    /// An upstream client call failed (transport, auth, decode).
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The ingestion service accepted an upload but returned no usable
    /// source identifier.
    #[error("upload accepted but no usable source id was returned")]
    MissingSourceId,
}

impl CoreError {
    /// Wraps a collaborator-specific error for transport across the
    /// trait boundary.
    pub fn upstream(err: impl std::fmt::Display) -> Self {
        Self::Upstream(err.to_string())
    }
}

/// Errors that abort an entire sync run.
///
/// Per-item failures never surface here; they are folded into the run
/// summary and retried naturally by the next run's diff.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The initial fetch of the remote listing or the inventory failed.
    /// No partial diff is attempted on stale or missing state.
    #[error("failed to fetch initial state: {0}")]
    FetchState(#[source] CoreError),
}
