//! Migrator registering the board schema in dependency order.
//! `tasks` references `columns`, so it is created second.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_columns;
mod m20240101_000002_create_tasks;
mod m20240102_000003_widen_text_fields;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_columns::Migration),
            Box::new(m20240101_000002_create_tasks::Migration),
            Box::new(m20240102_000003_widen_text_fields::Migration),
        ]
    }
}
