//! In-memory document store - used when no database is configured.

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Account, ListMetadata, Post, Record};
use blog_core::error::RepoError;
use blog_core::ports::{
    AccountFilter, AccountRepository, BaseRepository, CredentialStore, PostFilter, PostRepository,
    RecordFilter,
};

/// A collection of documents held in insertion order behind an async RwLock.
///
/// Listings are returned oldest first by `created_at`. A record's
/// [`Record::unique_key`] may not be shared with any other stored record.
/// Note: Data is lost on process restart.
pub struct InMemoryRepository<T, F> {
    store: RwLock<Vec<T>>,
    _filter: PhantomData<fn() -> F>,
}

/// In-memory account collection.
pub type InMemoryAccountRepository = InMemoryRepository<Account, AccountFilter>;

/// In-memory post collection.
pub type InMemoryPostRepository = InMemoryRepository<Post, PostFilter>;

impl<T, F> InMemoryRepository<T, F> {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Vec::new()),
            _filter: PhantomData,
        }
    }
}

impl<T, F> Default for InMemoryRepository<T, F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject `entity` if another record already holds its unique key.
fn check_unique<T: Record>(store: &[T], entity: &T) -> Result<(), RepoError> {
    let Some(key) = entity.unique_key() else {
        return Ok(());
    };
    if store
        .iter()
        .any(|r| r.id() != entity.id() && r.unique_key() == Some(key))
    {
        return Err(RepoError::Constraint(format!("Duplicate key {key}")));
    }
    Ok(())
}

/// Negative skips nothing; non-positive limit takes everything.
fn window(offset: i64, limit: i64) -> (usize, usize) {
    let skip = usize::try_from(offset).unwrap_or(0);
    let take = if limit > 0 {
        usize::try_from(limit).unwrap_or(usize::MAX)
    } else {
        usize::MAX
    };
    (skip, take)
}

#[async_trait]
impl<T, F> BaseRepository<T, F> for InMemoryRepository<T, F>
where
    T: Record + Clone + Send + Sync + 'static,
    F: RecordFilter<T> + 'static,
{
    async fn create(&self, entity: T) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        if store.iter().any(|r| r.id() == entity.id()) {
            return Err(RepoError::Constraint(format!(
                "Duplicate id {}",
                entity.id()
            )));
        }
        check_unique(&store, &entity)?;
        store.push(entity);
        Ok(())
    }

    async fn list(
        &self,
        filter: F,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<T>, ListMetadata), RepoError> {
        let store = self.store.read().await;

        let mut matching: Vec<&T> = store.iter().filter(|r| filter.matches(r)).collect();
        // Stable: equal timestamps keep insertion order.
        matching.sort_by_key(|r| r.created_at());

        let total = matching.len() as u64;
        let (skip, take) = window(offset, limit);
        let records = matching.into_iter().skip(skip).take(take).cloned().collect();

        Ok((
            records,
            ListMetadata {
                total,
                offset,
                limit,
            },
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<T, RepoError> {
        let store = self.store.read().await;
        store
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn replace(&self, entity: T) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        check_unique(&store, &entity)?;
        match store.iter_mut().find(|r| r.id() == entity.id()) {
            Some(slot) => *slot = entity,
            None => tracing::debug!(id = %entity.id(), "Replace matched no document"),
        }
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        match store.iter_mut().find(|r| r.id() == id) {
            Some(record) => record.mark_deleted(Utc::now()),
            None => tracing::debug!(id = %id, "Soft delete matched no document"),
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for InMemoryAccountRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|a| a.username == username).cloned())
    }
}

impl AccountRepository for InMemoryAccountRepository {}

impl PostRepository for InMemoryPostRepository {}
