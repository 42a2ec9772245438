use std::sync::Arc;

use pv_analytics_api::repositories::{PgEntityDirectory, PgReadingStore};
use pv_analytics_api::{create_pool, routes, AppState, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cfg_path = std::env::var("APP_CONFIG").unwrap_or_else(|_| "config/config.yaml".into());
    let cfg = Config::load(&cfg_path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!(path = %cfg_path, "Starting pv-analytics-api");

    let pool = create_pool(&cfg.database).await?;
    sqlx::query("SELECT 1").execute(&pool).await?;
    info!("Connected to database");

    let state = AppState::new(
        Arc::new(PgReadingStore::new(pool.clone())),
        Arc::new(PgEntityDirectory::new(pool)),
    );
    let router = routes::create_router(state);
    let addr = cfg.bind_address();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", addr, e))?;

    info!("API server listening on {}", addr);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for shutdown signal");
        }
        info!("Shutdown signal received");
    };

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
    {
        tracing::error!(error = %e, "API server error");
    }

    info!("Application shutdown complete");
    Ok(())
}
