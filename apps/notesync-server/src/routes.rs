//! HTTP trigger surface: health check and the sync endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use tracing::{error, info, warn};

use crate::state::AppState;

/// Fixed body returned when the initial state fetch fails.
const FETCH_FAILURE_BODY: &str = "Failed to fetch initial state from SharePoint or Firestore.";

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/sync", post(sync_handler))
        .with_state(state)
}

/// Health check; performs no work.
async fn health_handler() -> &'static str {
    "Service is running."
}

/// Runs one reconciliation pass.
///
/// The caller only ever sees aggregate counts or the fixed fatal
/// message; per-item outcomes go to the logs.
async fn sync_handler(State(state): State<AppState>) -> (StatusCode, String) {
    info!("sync requested");

    match state.orchestrator.run().await {
        Ok(summary) => {
            for upload in &summary.uploads {
                if !upload.outcome.is_complete() {
                    warn!(
                        file = %upload.file_name,
                        outcome = ?upload.outcome,
                        "file was not ingested this run"
                    );
                }
            }
            let body = format!(
                "Sync process finished. Created: {}, Deleted: {}.",
                summary.created, summary.deleted
            );
            (StatusCode::OK, body)
        }
        Err(err) => {
            error!(error = %err, "sync aborted");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                FETCH_FAILURE_BODY.to_string(),
            )
        }
    }
}
