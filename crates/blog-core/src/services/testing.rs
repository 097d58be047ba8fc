//! Test doubles for the repository ports.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Account, ListMetadata, Post, Record};
use crate::error::RepoError;
use crate::ports::{
    AccountRepository, BaseRepository, CredentialStore, PostRepository, RecordFilter,
};

/// Vec-backed repository that counts writes and can be told to fail.
pub(crate) struct StubRepository<T> {
    records: Mutex<Vec<T>>,
    fail: bool,
    writes: AtomicUsize,
}

impl<T> Default for StubRepository<T> {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail: false,
            writes: AtomicUsize::new(0),
        }
    }
}

impl<T> StubRepository<T> {
    pub(crate) fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), RepoError> {
        if self.fail {
            return Err(RepoError::Connection("stub store is down".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl<T, F> BaseRepository<T, F> for StubRepository<T>
where
    T: Record + Clone + Send + Sync + 'static,
    F: RecordFilter<T> + 'static,
{
    async fn create(&self, entity: T) -> Result<(), RepoError> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.records.lock().unwrap().push(entity);
        Ok(())
    }

    async fn list(
        &self,
        filter: F,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<T>, ListMetadata), RepoError> {
        self.check()?;
        let records = self.records.lock().unwrap();
        let matching: Vec<T> = records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(if limit > 0 { limit as usize } else { usize::MAX })
            .collect();
        Ok((page, ListMetadata { total, offset, limit }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<T, RepoError> {
        self.check()?;
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn replace(&self, entity: T) -> Result<(), RepoError> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().unwrap();
        if let Some(slot) = records.iter_mut().find(|r| r.id() == entity.id()) {
            *slot = entity;
        }
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.iter_mut().find(|r| r.id() == id) {
            record.mark_deleted(Utc::now());
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for StubRepository<Account> {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepoError> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }
}

impl AccountRepository for StubRepository<Account> {}

impl PostRepository for StubRepository<Post> {}
