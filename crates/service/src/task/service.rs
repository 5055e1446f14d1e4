use std::sync::Arc;
use tracing::{info, instrument};

use models::task::{self, NewTask};

use crate::errors::ServiceError;
use crate::task::repository::TaskRepository;

/// Application service encapsulating task business rules.
pub struct TaskService<R: TaskRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: TaskRepository + ?Sized> TaskService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create a task in `column_id`. The column is not looked up first; a
    /// missing column surfaces as the store's constraint error.
    #[instrument(skip(self, description))]
    pub async fn create_task(
        &self,
        title: &str,
        description: &str,
        progress: i32,
        column_id: i32,
    ) -> Result<task::Model, ServiceError> {
        let created = self
            .repo
            .create(NewTask {
                title: title.to_string(),
                description: description.to_string(),
                progress,
                column_id,
            })
            .await?;
        info!(id = created.id, column_id, "task_created");
        Ok(created)
    }

    pub async fn get_task_by_id(&self, id: i32) -> Result<task::Model, ServiceError> {
        self.repo.get_by_id(id).await
    }

    /// Partial update: `title` and `description` change only when non-empty,
    /// `progress` is always written.
    #[instrument(skip(self, description))]
    pub async fn update_task(
        &self,
        id: i32,
        title: &str,
        description: &str,
        progress: i32,
    ) -> Result<task::Model, ServiceError> {
        let mut current = self.repo.get_by_id(id).await?;
        if !title.is_empty() {
            current.title = title.to_string();
        }
        if !description.is_empty() {
            current.description = description.to_string();
        }
        current.progress = progress;
        let saved = self.repo.update(current).await?;
        info!(id = saved.id, progress = saved.progress, "task_updated");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: i32) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        info!(id, "task_deleted");
        Ok(())
    }

    /// No existence check on the column: an unknown column yields an empty list.
    pub async fn get_tasks_by_column_id(&self, column_id: i32) -> Result<Vec<task::Model>, ServiceError> {
        self.repo.get_by_column_id(column_id).await
    }
}
