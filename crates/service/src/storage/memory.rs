use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use models::column::{self, ColumnWithTasks, NewColumn};
use models::task::{self, NewTask};

use crate::column::ColumnRepository;
use crate::errors::ServiceError;
use crate::task::TaskRepository;

/// In-process store implementing both repositories.
///
/// Ids start at 1 and increase monotonically. The `tasks.column_id` foreign
/// key behaves as in the migration: inserting a task for a missing column
/// and deleting a column that still holds tasks both fail with
/// [`ServiceError::Db`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    columns: BTreeMap<i32, column::Model>,
    tasks: BTreeMap<i32, task::Model>,
    last_column_id: i32,
    last_task_id: i32,
}

impl Tables {
    fn tasks_of(&self, column_id: i32) -> Vec<task::Model> {
        self.tasks.values().filter(|t| t.column_id == column_id).cloned().collect()
    }
}

fn fk_violation(action: &str) -> ServiceError {
    ServiceError::Db(format!("{action} violates foreign key constraint \"fk_tasks_column\""))
}

impl InMemoryStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl ColumnRepository for InMemoryStore {
    async fn create(&self, input: NewColumn) -> Result<column::Model, ServiceError> {
        let mut tables = self.inner.write().await;
        tables.last_column_id += 1;
        let now = Utc::now().into();
        let row = column::Model {
            id: tables.last_column_id,
            title: input.title,
            color: input.color,
            created_at: now,
            updated_at: now,
        };
        tables.columns.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get_all(&self) -> Result<Vec<ColumnWithTasks>, ServiceError> {
        let tables = self.inner.read().await;
        Ok(tables
            .columns
            .values()
            .map(|c| ColumnWithTasks::new(c.clone(), tables.tasks_of(c.id)))
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<ColumnWithTasks, ServiceError> {
        let tables = self.inner.read().await;
        let found = tables.columns.get(&id).cloned().ok_or_else(|| ServiceError::not_found("column"))?;
        Ok(ColumnWithTasks::new(found, tables.tasks_of(id)))
    }

    async fn update(&self, column: column::Model) -> Result<column::Model, ServiceError> {
        let mut tables = self.inner.write().await;
        let slot = tables.columns.get_mut(&column.id).ok_or_else(|| ServiceError::not_found("column"))?;
        slot.title = column.title;
        slot.color = column.color;
        slot.updated_at = Utc::now().into();
        Ok(slot.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let mut tables = self.inner.write().await;
        if !tables.columns.contains_key(&id) {
            return Err(ServiceError::not_found("column"));
        }
        if tables.tasks.values().any(|t| t.column_id == id) {
            return Err(fk_violation("delete on table \"columns\""));
        }
        tables.columns.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn create(&self, input: NewTask) -> Result<task::Model, ServiceError> {
        let mut tables = self.inner.write().await;
        if !tables.columns.contains_key(&input.column_id) {
            return Err(fk_violation("insert on table \"tasks\""));
        }
        tables.last_task_id += 1;
        let now = Utc::now().into();
        let row = task::Model {
            id: tables.last_task_id,
            title: input.title,
            description: input.description,
            progress: input.progress,
            column_id: input.column_id,
            created_at: now,
            updated_at: now,
        };
        tables.tasks.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get_by_id(&self, id: i32) -> Result<task::Model, ServiceError> {
        let tables = self.inner.read().await;
        tables.tasks.get(&id).cloned().ok_or_else(|| ServiceError::not_found("task"))
    }

    async fn update(&self, task: task::Model) -> Result<task::Model, ServiceError> {
        let mut tables = self.inner.write().await;
        if !tables.columns.contains_key(&task.column_id) {
            return Err(fk_violation("update on table \"tasks\""));
        }
        let slot = tables.tasks.get_mut(&task.id).ok_or_else(|| ServiceError::not_found("task"))?;
        slot.title = task.title;
        slot.description = task.description;
        slot.progress = task.progress;
        slot.column_id = task.column_id;
        slot.updated_at = Utc::now().into();
        Ok(slot.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let mut tables = self.inner.write().await;
        tables.tasks.remove(&id).map(|_| ()).ok_or_else(|| ServiceError::not_found("task"))
    }

    async fn get_by_column_id(&self, column_id: i32) -> Result<Vec<task::Model>, ServiceError> {
        let tables = self.inner.read().await;
        Ok(tables.tasks_of(column_id))
    }
}
