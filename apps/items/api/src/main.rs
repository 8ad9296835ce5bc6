use axum_helpers::server::{close_postgres, create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    info!(
        repository = %config.items.repository,
        environment = ?config.environment,
        "Starting {} v{}",
        config.app.name,
        config.app.version
    );

    // Only the SQL-backed variants open a pool
    let db = match config.database.clone() {
        Some(database) => {
            let db = connect_from_config_with_retry(database, None)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

            if config.items.run_migrations {
                run_migrations::<migration::Migrator>(&db, config.app.name)
                    .await
                    .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;
            }
            Some(db)
        }
        None => None,
    };

    let state = AppState { config, db };

    // Build router with API routes
    let api_routes = api::routes(&state).await?;

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // Merge health endpoints into the app
    // - /health: liveness check with app name/version
    // - /ready: readiness check, pings the database when one is configured
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    let server = state.config.server.clone();
    info!(
        timeout = ?server.shutdown_timeout,
        "Starting items API with graceful shutdown"
    );

    create_production_app(app, &server, async move {
        if let Some(db) = state.db {
            info!("Shutting down: closing database connections");
            close_postgres(db, "items").await;
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Items API shutdown complete");
    Ok(())
}
