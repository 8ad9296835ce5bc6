use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement, Value};
use std::collections::HashMap;
use tracing::instrument;

use super::{ItemRow, SELECT_ITEMS, constraint_parts, where_clause};
use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemFilter, NewItem, UpdateItem};
use crate::repository::ItemRepository;

/// Values bound to `:name` placeholders
#[derive(Debug, Clone, Default)]
pub struct NamedParams {
    values: HashMap<String, Value>,
}

impl NamedParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

/// Rewrite `:name` placeholders to Postgres `$n` form.
///
/// A name used more than once is bound once and reuses its number. `::` casts
/// and text inside single-quoted literals are left alone. Referencing a name
/// missing from `params` is an error.
pub fn expand_named(sql: &str, params: &NamedParams) -> ItemResult<Statement> {
    let mut out = String::with_capacity(sql.len());
    let mut values: Vec<Value> = Vec::new();
    let mut numbered: HashMap<&str, usize> = HashMap::new();
    let mut in_literal = false;
    let bytes = sql.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let ch = bytes[i];

        if ch == b'\'' {
            in_literal = !in_literal;
        } else if ch == b':' && !in_literal {
            if bytes.get(i + 1) == Some(&b':') {
                out.push_str("::");
                i += 2;
                continue;
            }

            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
                end += 1;
            }

            if end > start && bytes[start].is_ascii_alphabetic() {
                let name = &sql[start..end];
                let position = match numbered.get(name) {
                    Some(position) => *position,
                    None => {
                        let value = params.get(name).ok_or_else(|| {
                            ItemError::Storage(format!("No value bound for parameter :{}", name))
                        })?;
                        values.push(value.clone());
                        numbered.insert(name, values.len());
                        values.len()
                    }
                };
                out.push('$');
                out.push_str(&position.to_string());
                i = end;
                continue;
            }
        }

        // Copy whole UTF-8 sequences so multi-byte characters survive
        let width = utf8_width(ch);
        out.push_str(&sql[i..i + width]);
        i += width;
    }

    Ok(Statement::from_sql_and_values(DbBackend::Postgres, out, values))
}

fn utf8_width(first: u8) -> usize {
    match first {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}

/// PostgreSQL implementation of ItemRepository written against named parameters
#[derive(Clone)]
pub struct NamedSqlItemRepository {
    db: DatabaseConnection,
}

impl NamedSqlItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Listing query with one `:name` predicate per constraint
pub(crate) fn find_all_sql(filter: &ItemFilter) -> (String, NamedParams) {
    let mut predicates = Vec::new();
    let mut params = NamedParams::new();

    for constraint in filter.constraints() {
        let (predicate, name, value) = constraint_parts(&constraint);
        predicates.push(format!("{} :{}", predicate, name));
        params.insert(name, value);
    }

    let sql = format!("{}{} ORDER BY id", SELECT_ITEMS, where_clause(&predicates));
    (sql, params)
}

#[async_trait]
impl ItemRepository for NamedSqlItemRepository {
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    async fn save(&self, input: NewItem) -> ItemResult<Item> {
        let sql = r#"
            INSERT INTO item (item_name, price, quantity)
            VALUES (:itemName, :price, :quantity)
            RETURNING id, item_name, price, quantity
        "#;
        tracing::debug!(sql, "Inserting item");
        let params = NamedParams::new()
            .add("itemName", input.name)
            .add("price", input.price)
            .add("quantity", input.quantity);

        let row = ItemRow::find_by_statement(expand_named(sql, &params)?)
            .one(&self.db)
            .await?
            .ok_or_else(|| ItemError::Storage("Insert returned no row".to_string()))?;

        tracing::info!(item_id = row.id, "Item created successfully");
        Ok(row.into())
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<()> {
        let sql = r#"
            UPDATE item
            SET item_name = :itemName, price = :price, quantity = :quantity
            WHERE id = :id
        "#;
        tracing::debug!(sql, "Updating item");
        let params = NamedParams::new()
            .add("itemName", input.name)
            .add("price", input.price)
            .add("quantity", input.quantity)
            .add("id", id);

        let result = self
            .db
            .execute_raw(expand_named(sql, &params)?)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ItemError::NotFound(id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        let sql = format!("{} WHERE id = :id", SELECT_ITEMS);
        tracing::debug!(sql = %sql, "Finding item");
        let params = NamedParams::new().add("id", id);

        let row = ItemRow::find_by_statement(expand_named(&sql, &params)?)
            .one(&self.db)
            .await?;

        Ok(row.map(Item::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, filter: ItemFilter) -> ItemResult<Vec<Item>> {
        let (sql, params) = find_all_sql(&filter);
        tracing::info!(sql = %sql, "Listing items");

        let rows = ItemRow::find_by_statement(expand_named(&sql, &params)?)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_named_numbers_in_order_of_appearance() {
        let params = NamedParams::new().add("b", 2).add("a", 1);
        let stmt = expand_named("SELECT :a, :b", &params).unwrap();
        assert_eq!(stmt.sql, "SELECT $1, $2");
        assert_eq!(stmt.values.unwrap().0, vec![Value::from(1), Value::from(2)]);
    }

    #[test]
    fn test_expand_named_reuses_repeated_names() {
        let params = NamedParams::new().add("id", 7i64);
        let stmt = expand_named("SELECT :id WHERE id = :id", &params).unwrap();
        assert_eq!(stmt.sql, "SELECT $1 WHERE id = $1");
        assert_eq!(stmt.values.unwrap().0.len(), 1);
    }

    #[test]
    fn test_expand_named_skips_casts_and_literals() {
        let params = NamedParams::new().add("price", 10);
        let stmt = expand_named("SELECT ':not_a_param', :price::bigint", &params).unwrap();
        assert_eq!(stmt.sql, "SELECT ':not_a_param', $1::bigint");
    }

    #[test]
    fn test_expand_named_missing_parameter() {
        let result = expand_named("SELECT :missing", &NamedParams::new());
        assert!(matches!(result, Err(ItemError::Storage(msg)) if msg.contains(":missing")));
    }

    #[test]
    fn test_find_all_sql_uses_named_placeholders() {
        let (sql, params) = find_all_sql(&ItemFilter::any().name_contains("itemA").max_price(10000));
        assert_eq!(
            sql,
            "SELECT id, item_name, price, quantity FROM item \
             WHERE item_name LIKE :itemName AND price <= :maxPrice ORDER BY id"
        );
        assert_eq!(params.get("itemName"), Some(&Value::from("%itemA%".to_string())));
        assert_eq!(params.get("maxPrice"), Some(&Value::from(10000)));
    }

    #[test]
    fn test_find_all_sql_empty_name_adds_nothing() {
        let (sql, params) = find_all_sql(&ItemFilter::any().name_contains(""));
        assert!(!sql.contains("WHERE"));
        assert!(params.get("itemName").is_none());
    }
}
