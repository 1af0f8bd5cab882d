//! # gradebook-adapter-storage-sqlx
//!
//! SQL persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `GradeRepository` port defined in `gradebook-app::ports::storage`
//!   for `PostgreSQL` and `SQLite`
//! - Manage connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `gradebook-app` (for port traits) and `gradebook-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod pool;
pub mod postgres_repo;
pub mod sqlite_repo;

pub use error::StorageError;
pub use pool::{Backend, Config, Database};
pub use postgres_repo::PgGradeRepository;
pub use sqlite_repo::SqliteGradeRepository;
