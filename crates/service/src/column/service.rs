use std::sync::Arc;
use tracing::{info, instrument};

use models::column::{ColumnWithTasks, NewColumn};

use crate::column::repository::ColumnRepository;
use crate::errors::ServiceError;

/// Application service encapsulating column business rules.
///
/// Title validation happens at the request boundary; the service persists
/// whatever it is given.
pub struct ColumnService<R: ColumnRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ColumnRepository + ?Sized> ColumnService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create a column. A fresh column has no tasks.
    ///
    /// # Examples
    /// ```
    /// use service::column::ColumnService;
    /// use service::storage::memory::InMemoryStore;
    /// use std::sync::Arc;
    /// let svc = ColumnService::new(Arc::new(InMemoryStore::new()));
    /// let created = tokio_test::block_on(svc.create_column("To Do", "")).unwrap();
    /// assert_eq!(created.column.id, 1);
    /// assert!(created.tasks.is_empty());
    /// ```
    #[instrument(skip(self))]
    pub async fn create_column(&self, title: &str, color: &str) -> Result<ColumnWithTasks, ServiceError> {
        let created = self
            .repo
            .create(NewColumn { title: title.to_string(), color: color.to_string() })
            .await?;
        info!(id = created.id, "column_created");
        Ok(ColumnWithTasks::new(created, Vec::new()))
    }

    pub async fn get_all_columns(&self) -> Result<Vec<ColumnWithTasks>, ServiceError> {
        self.repo.get_all().await
    }

    pub async fn get_column_by_id(&self, id: i32) -> Result<ColumnWithTasks, ServiceError> {
        self.repo.get_by_id(id).await
    }

    /// Overwrite title and color unconditionally; an empty value replaces the
    /// stored one.
    #[instrument(skip(self))]
    pub async fn update_column(&self, id: i32, title: &str, color: &str) -> Result<ColumnWithTasks, ServiceError> {
        let ColumnWithTasks { mut column, tasks } = self.repo.get_by_id(id).await?;
        column.title = title.to_string();
        column.color = color.to_string();
        let saved = self.repo.update(column).await?;
        info!(id = saved.id, "column_updated");
        Ok(ColumnWithTasks::new(saved, tasks))
    }

    #[instrument(skip(self))]
    pub async fn delete_column(&self, id: i32) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        info!(id, "column_deleted");
        Ok(())
    }
}
