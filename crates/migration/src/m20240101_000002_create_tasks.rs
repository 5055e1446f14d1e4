//! Create `tasks` table.
//! Each task belongs to one column. The foreign key carries no cascade rule:
//! a column that still holds tasks cannot be deleted.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(pk_auto(Tasks::Id))
                    .col(text(Tasks::Title).not_null())
                    .col(text(Tasks::Description).not_null().default(""))
                    .col(integer(Tasks::Progress).not_null().default(0))
                    .col(integer(Tasks::ColumnId).not_null())
                    .col(
                        timestamp_with_time_zone(Tasks::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Tasks::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_column")
                            .from(Tasks::Table, Tasks::ColumnId)
                            .to(Columns::Table, Columns::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_column_id")
                    .table(Tasks::Table)
                    .col(Tasks::ColumnId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Tasks::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Title,
    Description,
    Progress,
    ColumnId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Columns { Table, Id }
