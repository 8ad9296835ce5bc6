use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{Item, NewItem, UpdateItem};

/// Sea-ORM Entity for the `item` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "String(StringLen::N(10))")]
    pub item_name: String,
    pub price: i32,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Item {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.item_name,
            price: model.price,
            quantity: model.quantity,
        }
    }
}

// The id stays NotSet so the identity column assigns it
impl From<NewItem> for ActiveModel {
    fn from(input: NewItem) -> Self {
        Self {
            id: NotSet,
            item_name: Set(input.name),
            price: Set(input.price),
            quantity: Set(input.quantity),
        }
    }
}

impl ActiveModel {
    /// Mark every mutable column dirty with the replacement values
    pub fn apply_update(&mut self, input: UpdateItem) {
        self.item_name = Set(input.name);
        self.price = Set(input.price);
        self.quantity = Set(input.quantity);
    }
}
