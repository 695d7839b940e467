//! # Fitness Center API Server
//!
//! Serves the member and workout session endpoints over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/fitness_center cargo run -p fitcenter-api
//! DATABASE_URL=memory:// cargo run -p fitcenter-api
//! ```

use fitcenter_api::{
    app::{build_router, AppState},
    config::Config,
};
use fitcenter_shared::db::{
    migrations::{ensure_database_exists, get_migration_status, run_migrations},
    pool::{close_pool, create_pool},
    store::{MemoryStore, PgStore, Store},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "fitcenter_api=debug,fitcenter_shared=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Fitness Center API v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    let (store, pg_store): (Arc<dyn Store>, Option<PgStore>) = if config.database.is_memory() {
        tracing::warn!("Using in-memory store; data is lost on shutdown");
        (Arc::new(MemoryStore::new()), None)
    } else {
        if config.database.run_migrations {
            ensure_database_exists(&config.database.url).await?;
        }

        let pool = create_pool(config.database.pool_config()).await?;

        if config.database.run_migrations {
            run_migrations(&pool).await?;
            let status = get_migration_status(&pool).await?;
            tracing::info!(
                applied_migrations = status.applied_migrations,
                latest_version = ?status.latest_version,
                "Database schema ready"
            );
        }

        let pg_store = PgStore::new(pool);
        (Arc::new(pg_store.clone()), Some(pg_store))
    };

    let app = build_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pg_store) = pg_store {
        close_pool(pg_store.pool().clone()).await;
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
