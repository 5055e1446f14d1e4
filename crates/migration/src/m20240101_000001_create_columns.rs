//! Create `columns` table.
//!
//! Board lanes; `tasks` references it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Columns::Table)
                    .if_not_exists()
                    .col(pk_auto(Columns::Id))
                    .col(text(Columns::Title).not_null())
                    .col(text(Columns::Color).not_null().default(""))
                    .col(
                        timestamp_with_time_zone(Columns::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Columns::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Columns::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Columns { Table, Id, Title, Color, CreatedAt, UpdatedAt }
