//! HTTP front end for the explorer.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;

use crate::graph::SchemaSnapshot;
use crate::ui::{Store, UiState};

pub mod handlers;
pub mod page;

use handlers::{
    actions_handler, elements_handler, health_check, index_handler, table_handler, view_handler,
};

/// Shared by every handler
#[derive(Debug)]
pub struct AppState {
    pub store: Store,
    /// Page title
    pub title: String,
    /// Connection description shown in the page header, without credentials
    pub source: String,
}

impl AppState {
    pub fn new(snapshot: Arc<SchemaSnapshot>, initial: UiState, source: impl Into<String>) -> Self {
        Self {
            store: Store::new(snapshot, initial),
            title: "Schema Graph".to_string(),
            source: source.into(),
        }
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_check))
        .route("/api/view", get(view_handler))
        .route("/api/actions", post(actions_handler))
        .route("/api/tables/{name}", get(table_handler))
        .route("/api/elements", get(elements_handler))
        .with_state(state)
}

/// Serve until ctrl-c
pub async fn run(addr: SocketAddr, state: Arc<AppState>) -> std::io::Result<()> {
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    log::info!("Listening on http://{}", local);
    eprintln!("Schema graph available at http://{}", local);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Received shutdown signal, shutting down...");
}
