//! Store titles and colors as unbounded `text`.
//! Earlier schemas declared these as bounded `varchar`; on a fresh schema
//! this is a no-op.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Columns::Table)
                    .modify_column(ColumnDef::new(Columns::Title).text().not_null())
                    .modify_column(ColumnDef::new(Columns::Color).text().not_null())
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(Tasks::Table)
                    .modify_column(ColumnDef::new(Tasks::Title).text().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // Narrowing back could truncate stored values.
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Columns { Table, Title, Color }

#[derive(DeriveIden)]
enum Tasks { Table, Title }
