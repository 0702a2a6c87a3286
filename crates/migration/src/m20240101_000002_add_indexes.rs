use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_persons::Persons;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Persons: lookups by color
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_persons_color_id")
                    .table(Persons::Table)
                    .col(Persons::ColorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_persons_color_id").to_owned())
            .await
    }
}
