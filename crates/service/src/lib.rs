//! Service layer providing the board's business rules on top of `models`.
//! - `column` / `task`: repository traits (persistence mapping) and services.
//! - `storage`: alternative repository backends.
//! - Errors are reported through [`errors::ServiceError`].

pub mod errors;
pub mod column;
pub mod task;
pub mod storage;
#[cfg(test)]
pub mod test_support;
