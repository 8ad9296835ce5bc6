//! Connection cleanup run during graceful shutdown.

use tracing::{error, info};

/// Close a SeaORM pool, logging the outcome.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::close_postgres;
///
/// create_production_app(router, &config, close_postgres(db, "items")).await?;
/// ```
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(_) => info!(pool = name, "PostgreSQL connection closed"),
        Err(e) => error!(pool = name, error = %e, "Error closing PostgreSQL connection"),
    }
}
