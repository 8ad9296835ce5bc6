//! Wires the configured repository variant into the items router.

use axum::Router;
use domain_items::{
    CqrsItemService, ItemCommandRepository, ItemOperations, ItemQueryRepository, ItemService,
    MemoryItemRepository, NamedSqlItemRepository, OrmItemRepository, QueryBuilderItemRepository,
    SqlItemRepository, handlers, seed_sample_items,
};
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::RepositoryKind;
use crate::state::AppState;

/// Build the items router for the repository chosen in configuration.
///
/// Seeds the sample items first when `ITEM_SEED_DATA` is set.
pub async fn router(state: &AppState) -> eyre::Result<Router> {
    let kind = state.config.items.repository;
    let seed = state.config.items.seed_data;
    info!(repository = %kind, seed, "Selecting item repository");

    let db = || -> eyre::Result<DatabaseConnection> {
        state
            .db
            .clone()
            .ok_or_else(|| eyre::eyre!("{kind} repository requires a database connection"))
    };

    match kind {
        RepositoryKind::Memory => serve(ItemService::new(MemoryItemRepository::default()), seed).await,
        RepositoryKind::Sql => serve(ItemService::new(SqlItemRepository::new(db()?)), seed).await,
        RepositoryKind::NamedSql => {
            serve(ItemService::new(NamedSqlItemRepository::new(db()?)), seed).await
        }
        RepositoryKind::Orm => serve(ItemService::new(OrmItemRepository::new(db()?)), seed).await,
        RepositoryKind::QueryBuilder => {
            serve(ItemService::new(QueryBuilderItemRepository::new(db()?)), seed).await
        }
        RepositoryKind::Cqrs => {
            let db = db()?;
            let service = CqrsItemService::new(
                ItemCommandRepository::new(db.clone()),
                ItemQueryRepository::new(db),
            );
            serve(service, seed).await
        }
    }
}

async fn serve<S: ItemOperations + 'static>(service: S, seed: bool) -> eyre::Result<Router> {
    if seed {
        seed_sample_items(&service).await?;
    }
    Ok(handlers::router(service))
}
