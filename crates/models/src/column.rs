use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, task, validation};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "columns")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub color: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Tasks }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Tasks => Entity::has_many(task::Entity).into(),
        }
    }
}

impl Related<task::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tasks.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields a caller supplies when creating a column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewColumn {
    pub title: String,
    pub color: String,
}

/// A column row together with the tasks that reference it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnWithTasks {
    #[serde(flatten)]
    pub column: Model,
    pub tasks: Vec<task::Model>,
}

impl ColumnWithTasks {
    pub fn new(column: Model, tasks: Vec<task::Model>) -> Self { Self { column, tasks } }
}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    validation::require_non_empty("title", title)
}
