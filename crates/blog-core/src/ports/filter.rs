//! Record filters - store-agnostic descriptions of which records a listing matches.
//!
//! The in-memory store evaluates them with [`RecordFilter::matches`];
//! the database adapters translate the same fields into query conditions.

use chrono::{DateTime, Utc};

use crate::domain::{Account, Post, Record};

/// Predicate over persisted records of type `T`.
pub trait RecordFilter<T>: Send + Sync {
    fn matches(&self, record: &T) -> bool;
}

/// Account listing filter. Only the soft-delete rule applies to accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    pub include_deleted: bool,
}

impl AccountFilter {
    /// Live accounts only.
    pub fn live() -> Self {
        Self::default()
    }
}

impl RecordFilter<Account> for AccountFilter {
    fn matches(&self, account: &Account) -> bool {
        self.include_deleted || !account.is_deleted()
    }
}

/// Post listing filter. All present criteria are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Exact match on the author snapshot's username.
    pub author_username: Option<String>,
    /// Half-open `[from, until)` range on `created_at`.
    pub created_within: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub include_deleted: bool,
}

impl PostFilter {
    /// Live posts only, no other criteria.
    pub fn live() -> Self {
        Self::default()
    }

    pub fn by_author(mut self, username: impl Into<String>) -> Self {
        self.author_username = Some(username.into());
        self
    }

    pub fn created_between(mut self, from: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        self.created_within = Some((from, until));
        self
    }
}

impl RecordFilter<Post> for PostFilter {
    fn matches(&self, post: &Post) -> bool {
        if !self.include_deleted && post.is_deleted() {
            return false;
        }
        if let Some(username) = &self.author_username {
            if post.author.username != *username {
                return false;
            }
        }
        if let Some((from, until)) = self.created_within {
            if post.created_at < from || post.created_at >= until {
                return false;
            }
        }
        true
    }
}
