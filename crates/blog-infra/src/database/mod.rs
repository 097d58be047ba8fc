//! Document storage - in-memory collections and PostgreSQL tables.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;
pub use memory::{InMemoryAccountRepository, InMemoryPostRepository, InMemoryRepository};

#[cfg(feature = "postgres")]
pub use connections::connect;
#[cfg(feature = "postgres")]
pub use postgres_base::{IntoCondition, PostgresBaseRepository, SoftDeleteEntity};
#[cfg(feature = "postgres")]
pub use postgres_repo::{PostgresAccountRepository, PostgresPostRepository};
