mod config;
mod dto;
mod error;
mod handlers;
mod models;
mod repository;
mod service;

use std::sync::Arc;

use handlers::rest;
use repository::{InMemoryStore, NoteStore, Repository};
use service::NoteService;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to load config: {e}");
    });

    // Store creation and migration
    let store: Arc<dyn NoteStore> = match cfg.database_dsn.as_deref() {
        Some(dsn) => {
            let mut repo = Repository::new(dsn).await.unwrap_or_else(|e| {
                tracing::error!("Failed to establish database connection: {e}");
                panic!("failed to establish database connection: {e}");
            });

            repo.migrate().await.unwrap_or_else(|e| {
                tracing::error!("Failed to migrate database: {e}");
                panic!("failed to migrate database: {e}");
            });

            Arc::new(repo)
        }
        None => {
            tracing::warn!("No database DSN configured, notes will be kept in memory");
            Arc::new(InMemoryStore::new())
        }
    };

    // Service creation
    let service = Arc::new(NoteService::new(store));
    let router = rest::router(service);

    let listener = tokio::net::TcpListener::bind(cfg.address())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to {}: {e}", cfg.address());
            panic!("failed to bind to {}: {e}", cfg.address());
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("REST server starting, listening on {}", addr),
        Err(e) => tracing::warn!("Could not read listener address: {e}"),
    }

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!("HTTP server error: {e}");
        panic!("HTTP server error: {e}");
    }
}
