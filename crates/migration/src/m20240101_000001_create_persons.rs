//! Create `persons` table.
//!
//! Backs the table-based person repository; `id` is assigned by the database.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Persons::Table)
                    .if_not_exists()
                    .col(pk_auto(Persons::Id))
                    .col(string_len(Persons::Name, 128).not_null())
                    .col(string_len(Persons::LastName, 128).not_null())
                    .col(string_len(Persons::ZipCode, 16).not_null())
                    .col(string_len(Persons::City, 128).not_null())
                    .col(string_len(Persons::ColorName, 64).not_null())
                    .col(integer(Persons::ColorId).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Persons::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Persons {
    Table,
    Id,
    Name,
    LastName,
    ZipCode,
    City,
    ColorName,
    ColorId,
}
