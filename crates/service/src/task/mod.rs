//! Tasks: persistence mapping and business rules.
pub mod repository;
pub mod service;

pub use repository::{SeaOrmTaskRepository, TaskRepository};
pub use service::TaskService;
