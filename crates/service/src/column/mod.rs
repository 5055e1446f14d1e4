//! Columns: persistence mapping and business rules.
pub mod repository;
pub mod service;

pub use repository::{ColumnRepository, SeaOrmColumnRepository};
pub use service::ColumnService;
