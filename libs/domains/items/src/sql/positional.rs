use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement, Value};
use tracing::instrument;

use super::{ItemRow, SELECT_ITEMS, constraint_parts, where_clause};
use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemFilter, NewItem, UpdateItem};
use crate::repository::ItemRepository;

/// PostgreSQL implementation of ItemRepository using `$n` placeholders
#[derive(Clone)]
pub struct SqlItemRepository {
    db: DatabaseConnection,
}

impl SqlItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Build the listing query, numbering placeholders in constraint order
pub(crate) fn find_all_statement(filter: &ItemFilter) -> Statement {
    let mut predicates = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    for constraint in filter.constraints() {
        let (predicate, _, value) = constraint_parts(&constraint);
        values.push(value);
        predicates.push(format!("{} ${}", predicate, values.len()));
    }

    let sql = format!("{}{} ORDER BY id", SELECT_ITEMS, where_clause(&predicates));
    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

#[async_trait]
impl ItemRepository for SqlItemRepository {
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    async fn save(&self, input: NewItem) -> ItemResult<Item> {
        let sql = r#"
            INSERT INTO item (item_name, price, quantity)
            VALUES ($1, $2, $3)
            RETURNING id, item_name, price, quantity
        "#;
        tracing::debug!(sql, "Inserting item");

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [input.name.into(), input.price.into(), input.quantity.into()],
        );

        let row = ItemRow::find_by_statement(stmt)
            .one(&self.db)
            .await?
            .ok_or_else(|| ItemError::Storage("Insert returned no row".to_string()))?;

        tracing::info!(item_id = row.id, "Item created successfully");
        Ok(row.into())
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<()> {
        let sql = "UPDATE item SET item_name = $1, price = $2, quantity = $3 WHERE id = $4";
        tracing::debug!(sql, "Updating item");

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                input.name.into(),
                input.price.into(),
                input.quantity.into(),
                id.into(),
            ],
        );

        let result = self
            .db
            .execute_raw(stmt)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ItemError::NotFound(id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        let sql = format!("{} WHERE id = $1", SELECT_ITEMS);
        tracing::debug!(sql = %sql, "Finding item");

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let row = ItemRow::find_by_statement(stmt)
            .one(&self.db)
            .await?;

        Ok(row.map(Item::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, filter: ItemFilter) -> ItemResult<Vec<Item>> {
        let stmt = find_all_statement(&filter);
        tracing::info!(sql = %stmt.sql, "Listing items");

        let rows = ItemRow::find_by_statement(stmt)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }
}
