//! In-memory storage variant.
//!
//! The store is an explicit object that owns the map and the id counter; it is
//! shared through an `Arc` rather than living in process-wide state. Writers are
//! serialized by a `tokio::sync::RwLock`, so concurrent saves never hand out the
//! same id.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemFilter, NewItem, UpdateItem};
use crate::repository::ItemRepository;

#[derive(Debug, Default)]
struct StoreState {
    // Keyed by id; ids only grow, so iteration order is insertion order.
    items: BTreeMap<i64, Item>,
    sequence: i64,
}

/// Map of items plus the counter that assigns their ids
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    state: RwLock<StoreState>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn insert(&self, input: NewItem) -> Item {
        let mut state = self.state.write().await;
        state.sequence += 1;
        let item = Item::from_new(state.sequence, input);
        state.items.insert(item.id, item.clone());
        item
    }

    async fn update(&self, id: i64, input: UpdateItem) -> Option<()> {
        let mut state = self.state.write().await;
        let item = state.items.get_mut(&id)?;
        item.apply_update(input);
        Some(())
    }

    async fn get(&self, id: i64) -> Option<Item> {
        self.state.read().await.items.get(&id).cloned()
    }

    async fn select(&self, filter: &ItemFilter) -> Vec<Item> {
        let constraints = filter.constraints();
        self.state
            .read()
            .await
            .items
            .values()
            .filter(|item| constraints.iter().all(|c| c.matches(item)))
            .cloned()
            .collect()
    }

    /// Drop every item. The id counter keeps counting.
    pub async fn clear(&self) {
        self.state.write().await.items.clear();
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// `ItemRepository` backed by a [`MemoryItemStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryItemRepository {
    store: Arc<MemoryItemStore>,
}

impl MemoryItemRepository {
    pub fn new(store: Arc<MemoryItemStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<MemoryItemStore> {
        &self.store
    }

    /// Reset the backing store between tests
    pub async fn clear_store(&self) {
        self.store.clear().await;
    }
}

#[async_trait]
impl ItemRepository for MemoryItemRepository {
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    async fn save(&self, input: NewItem) -> ItemResult<Item> {
        let item = self.store.insert(input).await;
        tracing::debug!(item_id = item.id, "Item stored in memory");
        Ok(item)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<()> {
        self.store
            .update(id, input)
            .await
            .ok_or(ItemError::NotFound(id))
    }

    async fn find_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        Ok(self.store.get(id).await)
    }

    #[instrument(skip(self))]
    async fn find_all(&self, filter: ItemFilter) -> ItemResult<Vec<Item>> {
        Ok(self.store.select(&filter).await)
    }
}
