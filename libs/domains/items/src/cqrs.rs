//! Command/query split of item storage.
//!
//! Writes and single-row reads go through [`ItemCommandRepository`], listing goes
//! through [`ItemQueryRepository`]. Both are built from the same
//! `DatabaseConnection`, which is the only thing they share.

use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::DatabaseConnection;
use tracing::instrument;

use crate::{
    entity,
    error::{ItemError, ItemResult},
    models::{Item, ItemFilter, NewItem, UpdateItem},
    query_builder::query_items,
};

/// Write side: save, update and lookup by id
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemCommands: Send + Sync {
    async fn save(&self, input: NewItem) -> ItemResult<Item>;

    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<()>;

    async fn find_by_id(&self, id: i64) -> ItemResult<Option<Item>>;
}

/// Read side: filtered listing
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemQueries: Send + Sync {
    async fn find_all(&self, filter: ItemFilter) -> ItemResult<Vec<Item>>;
}

pub struct ItemCommandRepository {
    base: BaseRepository<entity::Entity>,
}

impl ItemCommandRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ItemCommands for ItemCommandRepository {
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    async fn save(&self, input: NewItem) -> ItemResult<Item> {
        let active_model: entity::ActiveModel = input.into();

        let model = self
            .base
            .insert(active_model)
            .await?;

        tracing::info!(item_id = model.id, "Item created successfully");
        Ok(model.into())
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<()> {
        let model = self
            .base
            .find_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))?;

        let mut active_model: entity::ActiveModel = model.into();
        active_model.apply_update(input);

        self.base
            .update(active_model)
            .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        let model = self
            .base
            .find_by_id(id)
            .await?;

        Ok(model.map(Item::from))
    }
}

pub struct ItemQueryRepository {
    db: DatabaseConnection,
}

impl ItemQueryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemQueries for ItemQueryRepository {
    #[instrument(skip(self))]
    async fn find_all(&self, filter: ItemFilter) -> ItemResult<Vec<Item>> {
        query_items(&self.db, &filter).await
    }
}
