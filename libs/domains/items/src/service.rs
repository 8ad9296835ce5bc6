//! Item Service - use-case layer
//!
//! Two services implement [`ItemOperations`]: [`ItemService`] delegates to a
//! single [`ItemRepository`], [`CqrsItemService`] routes writes and reads to
//! separate repositories over the same store. The HTTP layer only sees the trait.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::cqrs::{ItemCommands, ItemQueries};
use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemFilter, NewItem, UpdateItem};
use crate::repository::ItemRepository;

/// Item use cases exposed to handlers
#[async_trait]
pub trait ItemOperations: Send + Sync {
    /// Validate and persist a new item
    async fn save(&self, input: NewItem) -> ItemResult<Item>;

    /// Validate and apply a full update
    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<()>;

    async fn find_by_id(&self, id: i64) -> ItemResult<Option<Item>>;

    async fn find_items(&self, filter: ItemFilter) -> ItemResult<Vec<Item>>;

    /// Like `find_by_id`, but an unknown id is an error
    async fn get_item(&self, id: i64) -> ItemResult<Item> {
        self.find_by_id(id).await?.ok_or(ItemError::NotFound(id))
    }
}

/// Service delegating every use case to one repository
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    /// Create a new ItemService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[async_trait]
impl<R: ItemRepository> ItemOperations for ItemService<R> {
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    async fn save(&self, input: NewItem) -> ItemResult<Item> {
        input.validate()?;
        self.repository.save(input).await
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<()> {
        input.validate()?;
        self.repository.update(id, input).await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        self.repository.find_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn find_items(&self, filter: ItemFilter) -> ItemResult<Vec<Item>> {
        self.repository.find_all(filter).await
    }
}

/// Service with a write repository and a read repository
pub struct CqrsItemService<C: ItemCommands, Q: ItemQueries> {
    commands: Arc<C>,
    queries: Arc<Q>,
}

impl<C: ItemCommands, Q: ItemQueries> CqrsItemService<C, Q> {
    pub fn new(commands: C, queries: Q) -> Self {
        Self {
            commands: Arc::new(commands),
            queries: Arc::new(queries),
        }
    }
}

impl<C: ItemCommands, Q: ItemQueries> Clone for CqrsItemService<C, Q> {
    fn clone(&self) -> Self {
        Self {
            commands: Arc::clone(&self.commands),
            queries: Arc::clone(&self.queries),
        }
    }
}

#[async_trait]
impl<C: ItemCommands, Q: ItemQueries> ItemOperations for CqrsItemService<C, Q> {
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    async fn save(&self, input: NewItem) -> ItemResult<Item> {
        input.validate()?;
        self.commands.save(input).await
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<()> {
        input.validate()?;
        self.commands.update(id, input).await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        self.commands.find_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn find_items(&self, filter: ItemFilter) -> ItemResult<Vec<Item>> {
        self.queries.find_all(filter).await
    }
}
