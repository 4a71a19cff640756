//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_categories;
mod m20240101_000002_create_accounts;
mod m20240101_000003_create_stores;
mod m20240101_000004_add_trig_to_stores;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_categories::Migration),
            Box::new(m20240101_000002_create_accounts::Migration),
            Box::new(m20240101_000003_create_stores::Migration),
            Box::new(m20240101_000004_add_trig_to_stores::Migration),
        ]
    }
}
