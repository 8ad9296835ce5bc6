//! Raw SQL storage variants.
//!
//! Both repositories here send hand-written SQL through SeaORM's raw statement
//! API. Filter values are always bound as parameters; only fixed column names
//! and placeholders end up in the SQL text.

mod named;
mod positional;

pub use named::{NamedParams, NamedSqlItemRepository, expand_named};
pub use positional::SqlItemRepository;

use sea_orm::{FromQueryResult, Value};

use crate::models::{FilterConstraint, Item};

pub(crate) const SELECT_ITEMS: &str = "SELECT id, item_name, price, quantity FROM item";

/// Row shape shared by every raw query against `item`
#[derive(Debug, FromQueryResult)]
pub(crate) struct ItemRow {
    pub(crate) id: i64,
    pub(crate) item_name: String,
    pub(crate) price: i32,
    pub(crate) quantity: i32,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            name: row.item_name,
            price: row.price,
            quantity: row.quantity,
        }
    }
}

/// `LIKE` pattern matching `needle` anywhere in the column.
///
/// Postgres treats `\` as the default escape character, so escaping the
/// wildcards keeps the match a plain substring test.
pub fn like_contains(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Column predicate and bound value for one constraint
pub(crate) fn constraint_parts(constraint: &FilterConstraint) -> (&'static str, &'static str, Value) {
    match constraint {
        FilterConstraint::NameContains(name) => ("item_name LIKE", "itemName", like_contains(name).into()),
        FilterConstraint::MaxPrice(price) => ("price <=", "maxPrice", (*price).into()),
    }
}

/// Join accumulated predicates into a `WHERE` clause, or nothing when empty
pub(crate) fn where_clause(predicates: &[String]) -> String {
    if predicates.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", predicates.join(" AND "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_contains_wraps_needle() {
        assert_eq!(like_contains("itemA"), "%itemA%");
    }

    #[test]
    fn test_like_contains_escapes_wildcards() {
        assert_eq!(like_contains("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_contains("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_where_clause() {
        assert_eq!(where_clause(&[]), "");
        assert_eq!(
            where_clause(&["a = $1".to_string(), "b = $2".to_string()]),
            " WHERE a = $1 AND b = $2"
        );
    }
}
