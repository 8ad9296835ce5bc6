use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Item::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Item::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // Names longer than 10 characters are rejected by the database
                    .col(string_len(Item::ItemName, 10))
                    .col(integer(Item::Price))
                    .col(integer(Item::Quantity))
                    .to_owned(),
            )
            .await?;

        // Listing filters on price
        manager
            .create_index(
                Index::create()
                    .name("idx_item_price")
                    .table(Item::Table)
                    .col(Item::Price)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Item::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Item {
    Table,
    Id,
    ItemName,
    Price,
    Quantity,
}
