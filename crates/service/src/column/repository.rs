use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryOrder, Set,
};

use models::column::{self, ColumnWithTasks, Entity as ColumnEntity, NewColumn};
use models::task;

use crate::errors::ServiceError;

/// Persistence contract for columns.
///
/// Reads return the column together with its tasks.
#[async_trait]
pub trait ColumnRepository: Send + Sync {
    /// Insert a new row; the store assigns the id and timestamps.
    async fn create(&self, input: NewColumn) -> Result<column::Model, ServiceError>;
    /// Every column ordered by id, each with its tasks.
    async fn get_all(&self) -> Result<Vec<ColumnWithTasks>, ServiceError>;
    async fn get_by_id(&self, id: i32) -> Result<ColumnWithTasks, ServiceError>;
    /// Overwrite every mutable field of an existing row.
    async fn update(&self, column: column::Model) -> Result<column::Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmColumnRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmColumnRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ColumnRepository for SeaOrmColumnRepository {
    async fn create(&self, input: NewColumn) -> Result<column::Model, ServiceError> {
        let now = Utc::now().into();
        let am = column::ActiveModel {
            title: Set(input.title),
            color: Set(input.color),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn get_all(&self) -> Result<Vec<ColumnWithTasks>, ServiceError> {
        let rows = ColumnEntity::find()
            .find_with_related(task::Entity)
            .order_by_asc(column::Column::Id)
            .order_by_asc(task::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(rows.into_iter().map(|(c, tasks)| ColumnWithTasks::new(c, tasks)).collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<ColumnWithTasks, ServiceError> {
        let found = ColumnEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .ok_or_else(|| ServiceError::not_found("column"))?;
        let tasks = found
            .find_related(task::Entity)
            .order_by_asc(task::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(ColumnWithTasks::new(found, tasks))
    }

    async fn update(&self, column: column::Model) -> Result<column::Model, ServiceError> {
        let am = column::ActiveModel {
            id: Unchanged(column.id),
            title: Set(column.title),
            color: Set(column.color),
            created_at: Unchanged(column.created_at),
            updated_at: Set(Utc::now().into()),
        };
        am.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ServiceError::not_found("column"),
            other => ServiceError::Db(other.to_string()),
        })
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let res = ColumnEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found("column"));
        }
        Ok(())
    }
}
