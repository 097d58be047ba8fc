//! # Blog Infrastructure
//!
//! Concrete implementations of the storage ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//! - `minimal` - No external dependencies, in-memory only

pub mod database;

pub use database::{DatabaseConfig, InMemoryAccountRepository, InMemoryPostRepository};

#[cfg(feature = "postgres")]
pub use database::{PostgresAccountRepository, PostgresPostRepository};
