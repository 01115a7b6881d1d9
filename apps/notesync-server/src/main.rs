use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use notesync_connector_notebooklm::{NotebookLmClient, NotebookLmConfig};
use notesync_connector_sharepoint::{SharePointClient, SharePointConfig, SharePointCredentials};
use notesync_core::{SyncOptions, SyncOrchestrator};
use notesync_inventory::{FirestoreConfig, FirestoreStore};

mod config;
mod routes;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,notesync_core=debug")),
        )
        .init();

    // Load configuration
    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    });

    tracing::info!(
        host = %config.host,
        port = config.port,
        collection = %config.firestore_collection,
        "starting notesync server"
    );

    let sharepoint = SharePointClient::new(
        SharePointConfig::new(
            &config.sharepoint_tenant_id,
            &config.sharepoint_drive_id,
            &config.sharepoint_folder_id,
        ),
        SharePointCredentials {
            client_id: config.sharepoint_client_id.clone(),
            client_secret: config.sharepoint_client_secret.clone(),
        },
    )
    .unwrap_or_else(|e| {
        eprintln!("SharePoint client error: {e}");
        std::process::exit(1);
    });

    let notebooklm = NotebookLmClient::new(NotebookLmConfig::new(
        &config.notebooklm_project_number,
        &config.notebooklm_location,
        &config.notebooklm_notebook_id,
        &config.notebooklm_delegator_email,
        &config.notebooklm_impersonated_user,
    ))
    .unwrap_or_else(|e| {
        eprintln!("NotebookLM client error: {e}");
        std::process::exit(1);
    });

    let inventory = FirestoreStore::new(
        FirestoreConfig::new(&config.firestore_project_id)
            .with_collection(&config.firestore_collection),
    )
    .unwrap_or_else(|e| {
        eprintln!("Firestore client error: {e}");
        std::process::exit(1);
    });

    let orchestrator = Arc::new(SyncOrchestrator::new(
        Arc::new(sharepoint),
        Arc::new(notebooklm),
        Arc::new(inventory),
        SyncOptions {
            max_poll_attempts: config.max_poll_attempts,
            poll_interval: config.poll_interval,
        },
    ));
    let cancel = orchestrator.cancellation_token();

    let app = routes::app(AppState::new(orchestrator));

    let bind_addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Failed to bind {bind_addr}: {e}");
            std::process::exit(1);
        });

    tracing::info!(%bind_addr, "notesync server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown signal received");
            }
            // Abort in-flight poll loops so shutdown does not hang for
            // the remainder of a polling window.
            cancel.cancel();
        })
        .await
        .unwrap_or_else(|e| {
            eprintln!("Server error: {e}");
            std::process::exit(1);
        });
}
