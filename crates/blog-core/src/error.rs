//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Authenticated, but neither the owner nor an admin.
    #[error("Not allowed to modify {entity_type} {id}")]
    Forbidden { entity_type: &'static str, id: Uuid },

    #[error(transparent)]
    Repository(#[from] RepoError),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl DomainError {
    /// Lift a repository lookup failure, naming the entity that was missing.
    pub(crate) fn lookup(entity_type: &'static str, id: Uuid) -> impl FnOnce(RepoError) -> Self {
        move |err| match err {
            RepoError::NotFound => DomainError::NotFound { entity_type, id },
            other => DomainError::Repository(other),
        }
    }
}
