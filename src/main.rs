use notes_api::{
    AppState, build_router,
    config::{self, OwnershipPolicy},
    repository::Repository,
    service::{MemoryNotesService, NotesService, PostgresNotesService},
};
use tracing_subscriber::EnvFilter;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("notes_api=info,tower_http=info")),
        )
        .init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to locate or load config: {e}");
    });
    tracing::info!("Successfully loaded notes api config");

    // Service creation
    let service: Arc<dyn NotesService> = match &cfg.database_dsn {
        Some(database_dsn) => {
            let repo = Repository::new(database_dsn).await.unwrap_or_else(|e| {
                tracing::error!("Failed to establish database connection: {e}");
                panic!("failed to establish database connection: {e}");
            });
            let repo_ptr = Arc::new(tokio::sync::Mutex::new(repo));

            repo_ptr.lock().await.migrate().await.unwrap_or_else(|e| {
                tracing::error!("Failed to migrate database: {e}");
                panic!("failed to migrate database: {e}");
            });

            Arc::new(PostgresNotesService::new(repo_ptr))
        }
        None => {
            tracing::warn!("No database configured, notes are kept in memory only");
            Arc::new(MemoryNotesService::new())
        }
    };

    let state = match (cfg.ownership, cfg.access_token_key.as_deref()) {
        (OwnershipPolicy::Enforced, Some(key)) => AppState::enforced(service, key),
        (OwnershipPolicy::Enforced, None) => {
            tracing::error!("Ownership is enforced but no access token key is configured");
            panic!("access token key must be configured when ownership is enforced");
        }
        (OwnershipPolicy::Disabled, _) => AppState::ownerless(service),
    };
    tracing::info!("Ownership policy: {:?}", state.ownership);

    let router = build_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(cfg.bind_address())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to {}: {e}", cfg.bind_address());
            panic!("failed to bind to address: {e}");
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Notes API starting, listening on {}", addr),
        Err(e) => tracing::warn!("Notes API starting, local address unavailable: {e}"),
    }

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    }
}
