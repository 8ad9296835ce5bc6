use async_trait::async_trait;
use sea_orm::sea_query::{Condition, Expr, ExprTrait, InsertStatement, Order, Query, SelectStatement, SimpleExpr};
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult};
use tracing::instrument;

use crate::{
    entity::{self, Column},
    error::{ItemError, ItemResult},
    models::{FilterConstraint, Item, ItemFilter, NewItem, UpdateItem},
    repository::ItemRepository,
    sql::{ItemRow, like_contains},
};

/// Typed predicate for one constraint
fn predicate(constraint: &FilterConstraint) -> SimpleExpr {
    match constraint {
        FilterConstraint::NameContains(name) => Expr::col(Column::ItemName).like(like_contains(name)),
        FilterConstraint::MaxPrice(price) => Expr::col(Column::Price).lte(*price),
    }
}

/// AND of every present constraint; absent ones contribute nothing
pub fn filter_condition(filter: &ItemFilter) -> Condition {
    filter
        .constraints()
        .iter()
        .fold(Condition::all(), |condition, constraint| {
            condition.add(predicate(constraint))
        })
}

/// `SELECT ... FROM item [WHERE <condition>] ORDER BY id`
///
/// An empty condition would render as `WHERE TRUE`, so it is left out.
pub fn select_items(filter: &ItemFilter) -> SelectStatement {
    let mut select = Query::select();
    select
        .columns([Column::Id, Column::ItemName, Column::Price, Column::Quantity])
        .from(entity::Entity)
        .order_by(Column::Id, Order::Asc);

    if !filter.constraints().is_empty() {
        select.cond_where(filter_condition(filter));
    }
    select
}

/// Run the typed listing query on any connection
pub(crate) async fn query_items<C: ConnectionTrait>(
    db: &C,
    filter: &ItemFilter,
) -> ItemResult<Vec<Item>> {
    let stmt = db.get_database_backend().build(&select_items(filter));

    let rows = ItemRow::find_by_statement(stmt)
        .all(db)
        .await?;

    Ok(rows.into_iter().map(Item::from).collect())
}

/// ItemRepository whose listing is composed with sea-query's typed builder.
///
/// Inserts and updates are built with sea-query too, so no SQL text is
/// written by hand here.
#[derive(Clone)]
pub struct QueryBuilderItemRepository {
    db: DatabaseConnection,
}

/// `INSERT ... RETURNING` for a new item
pub fn insert_item(input: NewItem) -> ItemResult<InsertStatement> {
    let mut insert = Query::insert();
    insert
        .into_table(entity::Entity)
        .columns([Column::ItemName, Column::Price, Column::Quantity])
        .values([input.name.into(), input.price.into(), input.quantity.into()])
        .map_err(|e| ItemError::Storage(format!("Invalid insert: {}", e)))?
        .returning(Query::returning().columns([
            Column::Id,
            Column::ItemName,
            Column::Price,
            Column::Quantity,
        ]));
    Ok(insert)
}

impl QueryBuilderItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRepository for QueryBuilderItemRepository {
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    async fn save(&self, input: NewItem) -> ItemResult<Item> {
        let insert = insert_item(input)?;
        let stmt = self.db.get_database_backend().build(&insert);

        let row = ItemRow::find_by_statement(stmt)
            .one(&self.db)
            .await?
            .ok_or_else(|| ItemError::Storage("Insert returned no row".to_string()))?;

        tracing::info!(item_id = row.id, "Item created successfully");
        Ok(row.into())
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<()> {
        let update = Query::update()
            .table(entity::Entity)
            .values([
                (Column::ItemName, input.name.into()),
                (Column::Price, input.price.into()),
                (Column::Quantity, input.quantity.into()),
            ])
            .and_where(Expr::col(Column::Id).eq(id))
            .to_owned();
        let stmt = self.db.get_database_backend().build(&update);

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
        let select = Query::select()
            .columns([Column::Id, Column::ItemName, Column::Price, Column::Quantity])
            .from(entity::Entity)
            .and_where(Expr::col(Column::Id).eq(id))
            .to_owned();
        let stmt = self.db.get_database_backend().build(&select);

        let row = ItemRow::find_by_statement(stmt)
            .one(&self.db)
            .await?;

        Ok(row.map(Item::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, filter: ItemFilter) -> ItemResult<Vec<Item>> {
        query_items(&self.db, &filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::PostgresQueryBuilder;

    fn render(filter: &ItemFilter) -> String {
        select_items(filter).to_string(PostgresQueryBuilder)
    }

    #[test]
    fn test_select_without_constraints_has_no_where() {
        assert_eq!(
            render(&ItemFilter::any()),
            r#"SELECT "id", "item_name", "price", "quantity" FROM "item" ORDER BY "id" ASC"#
        );
    }

    #[test]
    fn test_select_with_name() {
        let sql = render(&ItemFilter::any().name_contains("itemA"));
        assert!(sql.contains(r#"WHERE "item_name" LIKE '%itemA%'"#), "{}", sql);
    }

    #[test]
    fn test_select_with_both_constraints_is_anded() {
        let sql = render(&ItemFilter::any().name_contains("itemA").max_price(10000));
        assert!(
            sql.contains(r#""item_name" LIKE '%itemA%' AND "price" <= 10000"#),
            "{}",
            sql
        );
    }

    #[test]
    fn test_select_ignores_empty_name() {
        let sql = render(&ItemFilter::any().name_contains(""));
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_built_statement_binds_values() {
        let select = select_items(&ItemFilter::any().max_price(10000));
        let (sql, values) = select.build(PostgresQueryBuilder);
        assert!(sql.contains(r#""price" <= $1"#));
        assert_eq!(values.0.len(), 1);
    }

    #[test]
    fn test_insert_binds_all_columns_and_returns_row() {
        let insert = insert_item(NewItem::new("itemC", 5000, 3)).unwrap();
        let (sql, values) = insert.build(PostgresQueryBuilder);
        assert!(sql.starts_with(r#"INSERT INTO "item" ("item_name", "price", "quantity")"#));
        assert!(sql.contains("VALUES ($1, $2, $3)"));
        assert!(sql.ends_with(r#"RETURNING "id", "item_name", "price", "quantity""#));
        assert_eq!(values.0.len(), 3);
    }
}
