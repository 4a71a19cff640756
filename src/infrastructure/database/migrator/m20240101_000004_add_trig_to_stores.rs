//! Add precomputed latitude / longitude sines and cosines to stores
//!
//! Proximity queries compare central-angle cosines built from these columns,
//! so they need nothing beyond arithmetic from the database. Existing rows
//! are backfilled from their coordinates.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, Statement};
use uuid::Uuid;

use super::m20240101_000003_create_stores::Stores;

#[derive(DeriveMigrationName)]
pub struct Migration;

const TRIG_COLUMNS: [&str; 4] = ["sin_lat", "cos_lat", "sin_lng", "cos_lng"];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // SQLite takes one column per ALTER TABLE
        for column in TRIG_COLUMNS {
            manager
                .alter_table(
                    Table::alter()
                        .table(Stores::Table)
                        .add_column(ColumnDef::new(Alias::new(column)).double())
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_index(
                Index::create()
                    .name("idx_stores_sin_lat")
                    .table(Stores::Table)
                    .col(Alias::new("sin_lat"))
                    .to_owned(),
            )
            .await?;

        backfill(manager).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_stores_sin_lat")
                    .table(Stores::Table)
                    .to_owned(),
            )
            .await?;

        for column in TRIG_COLUMNS {
            manager
                .alter_table(
                    Table::alter()
                        .table(Stores::Table)
                        .drop_column(Alias::new(column))
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }
}

async fn backfill(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let db = manager.get_connection();
    let backend = manager.get_database_backend();

    let rows = db
        .query_all(Statement::from_string(
            backend,
            "SELECT id, latitude, longitude FROM stores \
             WHERE latitude IS NOT NULL AND longitude IS NOT NULL",
        ))
        .await?;

    for row in rows {
        let id: Uuid = row.try_get("", "id")?;
        let lat = row.try_get::<f64>("", "latitude")?.to_radians();
        let lng = row.try_get::<f64>("", "longitude")?.to_radians();
        db.execute(Statement::from_sql_and_values(
            backend,
            "UPDATE stores SET sin_lat = ?, cos_lat = ?, sin_lng = ?, cos_lng = ? WHERE id = ?",
            [
                lat.sin().into(),
                lat.cos().into(),
                lng.sin().into(),
                lng.cos().into(),
                id.into(),
            ],
        ))
        .await?;
    }
    Ok(())
}
