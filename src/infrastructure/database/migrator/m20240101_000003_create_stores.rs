//! Create stores table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_categories::Categories;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stores::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Stores::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Stores::Name).string().not_null())
                    .col(
                        ColumnDef::new(Stores::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Stores::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Stores::ExternalId).uuid().not_null())
                    .col(ColumnDef::new(Stores::AccountId).uuid().not_null())
                    .col(ColumnDef::new(Stores::CategoryId).uuid().not_null())
                    .col(
                        ColumnDef::new(Stores::Tags)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Stores::Latitude).double())
                    .col(ColumnDef::new(Stores::Longitude).double())
                    .col(
                        ColumnDef::new(Stores::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Stores::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stores_category")
                            .from(Stores::Table, Stores::CategoryId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stores_category_id")
                    .table(Stores::Table)
                    .col(Stores::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stores_external_id")
                    .table(Stores::Table)
                    .col(Stores::ExternalId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stores_status")
                    .table(Stores::Table)
                    .col(Stores::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stores::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Stores {
    Table,
    Id,
    Name,
    Description,
    Status,
    ExternalId,
    AccountId,
    CategoryId,
    Tags,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
}
