//! # Fitness Center Shared Library
//!
//! Domain types, validation and storage used by the fitness center API.
//!
//! ## Module Organization
//!
//! - `validation`: request field checks (presence, email, phone, date, integers)
//! - `models`: `Member` and `WorkoutSession` rows and their insert inputs
//! - `db`: connection pool, migrations and the `Store` abstraction

pub mod db;
pub mod models;
pub mod validation;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
