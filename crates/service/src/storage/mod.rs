//! Repository backends other than Postgres.
//!
//! `memory` keeps both tables in process and mirrors the constraints the
//! database schema enforces.

pub mod memory;
