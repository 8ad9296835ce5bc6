use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use tracing::instrument;

use crate::{
    entity,
    error::{ItemError, ItemResult},
    models::{FilterConstraint, Item, ItemFilter, NewItem, UpdateItem},
    repository::ItemRepository,
    sql::like_contains,
};

/// ItemRepository working through SeaORM entities.
///
/// Updates load the row inside a transaction, mutate the active model and
/// commit; an unknown id rolls back without writing anything.
#[derive(Clone)]
pub struct OrmItemRepository {
    db: DatabaseConnection,
}

impl OrmItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRepository for OrmItemRepository {
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    async fn save(&self, input: NewItem) -> ItemResult<Item> {
        let active_model: entity::ActiveModel = input.into();

        let model = active_model
            .insert(&self.db)
            .await?;

        tracing::info!(item_id = model.id, "Item created successfully");
        Ok(model.into())
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<()> {
        let txn = self.db.begin().await?;

        // Dropping txn on the early return rolls it back
        let model = entity::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ItemError::NotFound(id))?;

        let mut active_model: entity::ActiveModel = model.into();
        active_model.apply_update(input);
        active_model.update(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?;

        Ok(model.map(Item::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, filter: ItemFilter) -> ItemResult<Vec<Item>> {
        let mut query = entity::Entity::find();

        for constraint in filter.constraints() {
            query = match constraint {
                FilterConstraint::NameContains(name) => {
                    query.filter(entity::Column::ItemName.like(like_contains(&name)))
                }
                FilterConstraint::MaxPrice(price) => query.filter(entity::Column::Price.lte(price)),
            };
        }

        let models = query
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Item::from).collect())
    }
}
