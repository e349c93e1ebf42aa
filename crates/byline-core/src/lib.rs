//! # Byline Core
//!
//! The domain layer of the Byline data model.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the `Author` and `Post` entities, their field validators, and the
//! validate-then-write operations an external store is driven through.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, ValidationError};
