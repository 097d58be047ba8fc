use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Account, ListMetadata, Post};
use crate::error::RepoError;

use super::auth::CredentialStore;
use super::filter::{AccountFilter, PostFilter};

/// Generic repository trait for soft-deleting document collections.
///
/// Skip/limit rules shared by every implementation: a negative offset skips
/// nothing, and a limit of zero or less returns every matching record.
#[async_trait]
pub trait BaseRepository<T, F>: Send + Sync {
    /// Insert a fully-formed record. The id is assigned by the caller.
    async fn create(&self, entity: T) -> Result<(), RepoError>;

    /// Records matching `filter`, after skip/limit, plus the unpaged match count.
    async fn list(
        &self,
        filter: F,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<T>, ListMetadata), RepoError>;

    /// Find a record by id, soft-deleted or not.
    async fn find_by_id(&self, id: Uuid) -> Result<T, RepoError>;

    /// Overwrite the stored record with the same id. Succeeds without effect
    /// when no such record exists.
    async fn replace(&self, entity: T) -> Result<(), RepoError>;

    /// Stamp `deleted_at` with the current time. Succeeds without effect
    /// when no such record exists.
    async fn soft_delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Account repository; also serves as the credential store.
#[async_trait]
pub trait AccountRepository: BaseRepository<Account, AccountFilter> + CredentialStore {}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostFilter> {}
