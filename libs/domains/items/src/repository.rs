use async_trait::async_trait;

use crate::error::ItemResult;
use crate::models::{Item, ItemFilter, NewItem, UpdateItem};

/// Repository trait for Item persistence
///
/// Every storage variant (in-memory, raw SQL, named SQL, ORM, query builder)
/// implements this contract and must return identical results for the same
/// sequence of calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist a new item and return it with its assigned id
    async fn save(&self, input: NewItem) -> ItemResult<Item>;

    /// Replace name, price and quantity of an existing item.
    ///
    /// Fails with `ItemError::NotFound` without touching storage when the id is unknown.
    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<()>;

    /// Get an item by ID
    async fn find_by_id(&self, id: i64) -> ItemResult<Option<Item>>;

    /// List items matching the filter in storage order
    async fn find_all(&self, filter: ItemFilter) -> ItemResult<Vec<Item>>;
}
