//! # gradebook-adapter-storage-redis
//!
//! Redis persistence adapter using [redis-rs](https://docs.rs/redis).
//!
//! ## Responsibilities
//! - Implement the `GradeRepository` port defined in `gradebook-app::ports::storage`
//! - Own the multiplexed connection manager (reconnects transparently)
//! - Map between domain types and the key layout:
//!   - `grade:{id}` — hash with `name` and `grade` fields
//!   - `grades:next_id` — counter backing id allocation
//!
//! ## Dependency rule
//! Depends on `gradebook-app` (for port traits) and `gradebook-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod connection;
pub mod error;
pub mod grade_repo;
pub mod keys;

pub use connection::{Config, RedisConnection};
pub use error::StorageError;
pub use grade_repo::RedisGradeRepository;
