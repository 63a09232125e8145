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
                    .col(pk_auto(Item::Id))
                    .col(integer_null(Item::SheetNo))
                    .col(string(Item::Name))
                    .col(string(Item::ItemType))
                    .col(string(Item::Participants))
                    .col(timestamp(Item::CreatedAt))
                    .col(timestamp(Item::UpdatedAt))
                    .col(timestamp(Item::ExpiresAt))
                    .col(boolean(Item::Synced).default(false))
                    .to_owned(),
            )
            .await
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
    SheetNo,
    Name,
    ItemType,
    Participants,
    CreatedAt,
    UpdatedAt,
    ExpiresAt,
    Synced,
}
