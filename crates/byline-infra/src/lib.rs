//! # Byline Infrastructure
//!
//! Concrete implementations of the ports defined in `byline-core`.
//! This crate owns durability, uniqueness enforcement, and connection
//! management; the validation contract lives entirely in the core.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory stores only
//! - `postgres` - PostgreSQL support via SeaORM

pub mod database;

// Re-exports - In-Memory
pub use database::{InMemoryAuthorRepository, InMemoryPostRepository};

// Re-exports - Postgres
#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresAuthorRepository, PostgresPostRepository};
