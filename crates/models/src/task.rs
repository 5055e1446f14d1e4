use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{column, errors, validation};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    /// 0-100 by convention; not enforced.
    pub progress: i32,
    pub column_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Column }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Column => Entity::belongs_to(column::Entity)
                .from(Column::ColumnId)
                .to(column::Column::Id)
                .into(),
        }
    }
}

impl Related<column::Entity> for Entity {
    fn to() -> RelationDef { Relation::Column.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields a caller supplies when creating a task.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub progress: i32,
    pub column_id: i32,
}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    validation::require_non_empty("title", title)
}

pub fn validate_column_id(raw: Option<i64>) -> Result<i32, errors::ModelError> {
    let raw = raw.ok_or_else(|| errors::ModelError::Validation("column_id is required".into()))?;
    validation::validate_identifier("column_id", raw)
}
