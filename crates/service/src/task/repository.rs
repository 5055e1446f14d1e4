use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use models::task::{self, Entity as TaskEntity, NewTask};

use crate::errors::ServiceError;

/// Persistence contract for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new row. A `column_id` without a matching column is a
    /// constraint violation reported as [`ServiceError::Db`].
    async fn create(&self, input: NewTask) -> Result<task::Model, ServiceError>;
    async fn get_by_id(&self, id: i32) -> Result<task::Model, ServiceError>;
    /// Overwrite every mutable field of an existing row.
    async fn update(&self, task: task::Model) -> Result<task::Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
    /// Tasks whose `column_id` matches; empty when there are none.
    async fn get_by_column_id(&self, column_id: i32) -> Result<Vec<task::Model>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmTaskRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl TaskRepository for SeaOrmTaskRepository {
    async fn create(&self, input: NewTask) -> Result<task::Model, ServiceError> {
        let now = Utc::now().into();
        let am = task::ActiveModel {
            title: Set(input.title),
            description: Set(input.description),
            progress: Set(input.progress),
            column_id: Set(input.column_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn get_by_id(&self, id: i32) -> Result<task::Model, ServiceError> {
        TaskEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .ok_or_else(|| ServiceError::not_found("task"))
    }

    async fn update(&self, task: task::Model) -> Result<task::Model, ServiceError> {
        let am = task::ActiveModel {
            id: Unchanged(task.id),
            title: Set(task.title),
            description: Set(task.description),
            progress: Set(task.progress),
            column_id: Set(task.column_id),
            created_at: Unchanged(task.created_at),
            updated_at: Set(Utc::now().into()),
        };
        am.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ServiceError::not_found("task"),
            other => ServiceError::Db(other.to_string()),
        })
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let res = TaskEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found("task"));
        }
        Ok(())
    }

    async fn get_by_column_id(&self, column_id: i32) -> Result<Vec<task::Model>, ServiceError> {
        TaskEntity::find()
            .filter(task::Column::ColumnId.eq(column_id))
            .order_by_asc(task::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }
}
