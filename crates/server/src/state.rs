use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::column::{ColumnRepository, ColumnService, SeaOrmColumnRepository};
use service::storage::memory::InMemoryStore;
use service::task::{SeaOrmTaskRepository, TaskRepository, TaskService};

/// Shared handler state: one service per entity over trait-object repositories.
#[derive(Clone)]
pub struct AppState {
    pub columns: Arc<ColumnService<dyn ColumnRepository>>,
    pub tasks: Arc<TaskService<dyn TaskRepository>>,
}

impl AppState {
    pub fn new(columns: Arc<dyn ColumnRepository>, tasks: Arc<dyn TaskRepository>) -> Self {
        Self {
            columns: Arc::new(ColumnService::new(columns)),
            tasks: Arc::new(TaskService::new(tasks)),
        }
    }

    pub fn with_database(db: DatabaseConnection) -> Self {
        Self::new(
            Arc::new(SeaOrmColumnRepository::new(db.clone())),
            Arc::new(SeaOrmTaskRepository::new(db)),
        )
    }

    /// Both repositories backed by one process-local store.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(store.clone(), store)
    }
}
