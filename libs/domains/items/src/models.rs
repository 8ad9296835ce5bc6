use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Item entity - a persisted record with a storage-assigned id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Identifier assigned by storage on save, never changes afterwards
    pub id: i64,
    /// Item name
    #[serde(rename = "itemName")]
    pub name: String,
    /// Unit price
    pub price: i32,
    /// Units in stock
    pub quantity: i32,
}

impl Item {
    /// Build the stored form of an add-request once storage has picked an id
    pub fn from_new(id: i64, input: NewItem) -> Self {
        Self {
            id,
            name: input.name,
            price: input.price,
            quantity: input.quantity,
        }
    }

    /// Replace every mutable field, keeping the id
    pub fn apply_update(&mut self, update: UpdateItem) {
        self.name = update.name;
        self.price = update.price;
        self.quantity = update.quantity;
    }
}

/// Add-request for a new item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewItem {
    #[serde(rename = "itemName")]
    #[validate(length(min = 1, max = 10))]
    pub name: String,
    #[validate(range(min = 0))]
    pub price: i32,
    #[validate(range(min = 0))]
    pub quantity: i32,
}

impl NewItem {
    pub fn new(name: impl Into<String>, price: i32, quantity: i32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }
}

/// Full replacement of an item's mutable fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[serde(rename = "itemName")]
    #[validate(length(min = 1, max = 10))]
    pub name: String,
    #[validate(range(min = 0))]
    pub price: i32,
    #[validate(range(min = 0))]
    pub quantity: i32,
}

impl UpdateItem {
    pub fn new(name: impl Into<String>, price: i32, quantity: i32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }
}

impl From<&Item> for UpdateItem {
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
        }
    }
}

/// Query filters for listing items.
///
/// Both fields are optional and independent. An empty value (what an unfilled
/// search form submits) counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ItemFilter {
    /// Case-sensitive substring the name must contain
    #[serde(default, deserialize_with = "empty_as_none")]
    pub item_name: Option<String>,
    /// Inclusive upper bound on the price
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_price: Option<i32>,
}

impl ItemFilter {
    /// Filter with no constraints
    pub fn any() -> Self {
        Self::default()
    }

    pub fn name_contains(mut self, name: impl Into<String>) -> Self {
        self.item_name = Some(name.into());
        self
    }

    pub fn max_price(mut self, price: i32) -> Self {
        self.max_price = Some(price);
        self
    }

    /// The constraints this filter actually imposes, in a fixed order.
    ///
    /// Every storage variant builds its predicate from this list, so an empty
    /// name is dropped here once instead of in each backend.
    pub fn constraints(&self) -> Vec<FilterConstraint> {
        let name = self
            .item_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| FilterConstraint::NameContains(name.to_owned()));
        let price = self.max_price.map(FilterConstraint::MaxPrice);

        name.into_iter().chain(price).collect()
    }

    /// Evaluate the filter against an item in memory
    pub fn matches(&self, item: &Item) -> bool {
        self.constraints()
            .iter()
            .all(|constraint| constraint.matches(item))
    }
}

/// A single predicate of an [`ItemFilter`]. Constraints are always ANDed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterConstraint {
    NameContains(String),
    MaxPrice(i32),
}

impl FilterConstraint {
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            FilterConstraint::NameContains(needle) => item.name.contains(needle.as_str()),
            FilterConstraint::MaxPrice(max) => item.price <= *max,
        }
    }
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, price: i32) -> Item {
        Item {
            id: 1,
            name: name.to_string(),
            price,
            quantity: 1,
        }
    }

    #[test]
    fn test_constraints_empty_when_unset() {
        assert!(ItemFilter::any().constraints().is_empty());
    }

    #[test]
    fn test_empty_name_is_no_constraint() {
        let filter = ItemFilter::any().name_contains("");
        assert!(filter.constraints().is_empty());
        assert!(filter.matches(&item("anything", 1)));
    }

    #[test]
    fn test_constraints_keep_name_before_price() {
        let filter = ItemFilter::any().max_price(10000).name_contains("itemA");
        assert_eq!(
            filter.constraints(),
            vec![
                FilterConstraint::NameContains("itemA".to_string()),
                FilterConstraint::MaxPrice(10000),
            ]
        );
    }

    #[test]
    fn test_name_match_is_case_sensitive_substring() {
        let filter = ItemFilter::any().name_contains("temA");
        assert!(filter.matches(&item("itemA-1", 10)));
        assert!(!filter.matches(&item("ITEMA-1", 10)));
    }

    #[test]
    fn test_max_price_is_inclusive() {
        let filter = ItemFilter::any().max_price(10000);
        assert!(filter.matches(&item("a", 10000)));
        assert!(!filter.matches(&item("a", 10001)));
    }

    #[test]
    fn test_both_constraints_are_anded() {
        let filter = ItemFilter::any().name_contains("itemA").max_price(10000);
        assert!(filter.matches(&item("itemA-1", 10000)));
        assert!(!filter.matches(&item("itemA-2", 20000)));
        assert!(!filter.matches(&item("itemB-1", 5000)));
    }

    #[test]
    fn test_filter_deserializes_empty_query_values_as_absent() {
        let filter: ItemFilter =
            serde_json::from_value(serde_json::json!({"itemName": "", "maxPrice": ""})).unwrap();
        assert_eq!(filter, ItemFilter::any());
    }

    #[test]
    fn test_filter_deserializes_query_values() {
        let filter: ItemFilter =
            serde_json::from_value(serde_json::json!({"itemName": "itemA", "maxPrice": "10000"}))
                .unwrap();
        assert_eq!(filter, ItemFilter::any().name_contains("itemA").max_price(10000));
    }

    #[test]
    fn test_filter_rejects_non_numeric_price() {
        let result: Result<ItemFilter, _> =
            serde_json::from_value(serde_json::json!({"maxPrice": "cheap"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_new_item_validation() {
        assert!(NewItem::new("itemA", 10000, 10).validate().is_ok());
        assert!(NewItem::new("", 10000, 10).validate().is_err());
        assert!(NewItem::new("name-too-long", 10000, 10).validate().is_err());
        assert!(NewItem::new("itemA", -1, 10).validate().is_err());
        assert!(NewItem::new("itemA", 10, -1).validate().is_err());
    }

    #[test]
    fn test_apply_update_keeps_id() {
        let mut stored = Item::from_new(7, NewItem::new("itemA", 10000, 10));
        stored.apply_update(UpdateItem::new("itemB", 20000, 30));
        assert_eq!(stored.id, 7);
        assert_eq!(stored.name, "itemB");
        assert_eq!(stored.price, 20000);
        assert_eq!(stored.quantity, 30);
    }

    #[test]
    fn test_item_serializes_name_as_item_name() {
        let json = serde_json::to_value(item("itemA", 10)).unwrap();
        assert_eq!(json["itemName"], "itemA");
        assert!(json.get("name").is_none());
    }
}
