//! SeaORM entities for the board (`columns`, `tasks`), inbound field
//! validation, and database connection setup.

pub mod errors;
pub mod db;
pub mod validation;
pub mod column;
pub mod task;

#[cfg(test)]
mod tests;
