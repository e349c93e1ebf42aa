//! Store implementations and connection management.

mod memory;

#[cfg(feature = "postgres")]
mod connections;
#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

pub use memory::{InMemoryAuthorRepository, InMemoryPostRepository};

#[cfg(feature = "postgres")]
pub use connections::{DatabaseConfig, connect};
#[cfg(feature = "postgres")]
pub use postgres_repo::{PostgresAuthorRepository, PostgresPostRepository};
