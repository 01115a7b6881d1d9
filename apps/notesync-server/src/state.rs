//! Shared application state.

use std::sync::Arc;

use notesync_core::SyncOrchestrator;

/// State handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<SyncOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<SyncOrchestrator>) -> Self {
        Self { orchestrator }
    }
}
