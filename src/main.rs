//! Server entry point: loads `.env` and settings, opens the record store, mounts all routes.

use farmers_api::{
    app_router, ensure_database_exists, load_credentials, AppConfig, AppState, MemoryRecordStore, PgRecordStore,
    RecordStore, StoreBackend,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("farmers_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let credentials = load_credentials(config.credentials_path.as_deref())?;
    tracing::info!(count = credentials.len(), "credentials loaded");

    let store = open_store(&config).await?;
    let state = AppState::new(store, credentials);
    let app = app_router(state, &config);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Open the configured store. A database that cannot be reached at startup is logged, not fatal:
/// requests fail with a storage error, and the collection is only created on the next restart.
async fn open_store(config: &AppConfig) -> Result<Arc<dyn RecordStore>, Box<dyn std::error::Error>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("using in-memory record store");
            Ok(Arc::new(MemoryRecordStore::new()))
        }
        StoreBackend::Postgres => {
            if let Err(e) = ensure_database_exists(&config.database_url).await {
                tracing::error!(error = %e, "could not ensure database exists");
            }
            let store = PgRecordStore::connect_lazy(&config.database_url, &config.schema)?;
            match store.ensure_collection().await {
                Ok(()) => tracing::info!(schema = %config.schema, "connected to record store"),
                Err(e) => tracing::error!(error = %e, "record store connection error"),
            }
            Ok(Arc::new(store))
        }
    }
}
