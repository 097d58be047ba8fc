//! Post service - filtering, pagination and ownership rules for posts.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use uuid::Uuid;

use crate::domain::{Identity, ListMetadata, Page, Post, Record};
use crate::error::DomainError;
use crate::ports::{PostFilter, PostRepository};

const ENTITY: &str = "Post";

/// Input for a new post. The author comes from the caller's identity.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

/// Replacement values for a post's editable fields.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
}

/// Caller-supplied listing criteria. Empty strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct PostCriteria {
    /// Exact match on the author's username at posting time.
    pub author_username: Option<String>,
    /// Calendar day, `YYYY-MM-DD`. Unparseable values are ignored.
    pub date: Option<String>,
}

impl PostCriteria {
    /// Build the repository filter. Soft-deleted posts are always excluded.
    pub fn into_filter(self) -> PostFilter {
        let mut filter = PostFilter::live();

        if let Some(username) = self.author_username.filter(|u| !u.is_empty()) {
            filter = filter.by_author(username);
        }

        if let Some(date) = self.date.filter(|d| !d.is_empty()) {
            match day_range(&date) {
                Some((from, until)) => filter = filter.created_between(from, until),
                None => tracing::debug!(date = %date, "Ignoring unparseable date filter"),
            }
        }

        filter
    }
}

/// `[date 00:00 UTC, next day 00:00 UTC)`.
fn day_range(date: &str) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let from = day.and_hms_opt(0, 0, 0)?.and_utc();
    Some((from, from + TimeDelta::days(1)))
}

/// Business rules for posts.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Create a post authored by `author`.
    pub async fn create(&self, new: NewPost, author: &Identity) -> Result<Post, DomainError> {
        validate_title(&new.title)?;

        let post = Post::new(new.title, new.content, author);
        self.repo.create(post.clone()).await?;

        tracing::info!(post_id = %post.id, author_id = %author.id, "Post created");
        Ok(post)
    }

    /// List live posts matching `criteria`.
    pub async fn list(
        &self,
        criteria: PostCriteria,
        page: Page,
    ) -> Result<(Vec<Post>, ListMetadata), DomainError> {
        let filter = criteria.into_filter();
        Ok(self.repo.list(filter, page.offset(), page.limit).await?)
    }

    /// Fetch any post by id, including soft-deleted ones.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(DomainError::lookup(ENTITY, id))
    }

    /// Replace title and content. Author and creation time are kept.
    pub async fn update(
        &self,
        id: Uuid,
        changes: PostChanges,
        caller: &Identity,
    ) -> Result<Post, DomainError> {
        validate_title(&changes.title)?;

        let current = self.authorize(id, caller).await?;
        let revised = current.revised(changes.title, changes.content);
        self.repo.replace(revised.clone()).await?;

        tracing::info!(post_id = %id, caller_id = %caller.id, "Post updated");
        Ok(revised)
    }

    /// Soft-delete a post.
    pub async fn delete(&self, id: Uuid, caller: &Identity) -> Result<(), DomainError> {
        self.authorize(id, caller).await?;
        self.repo.soft_delete(id).await?;

        tracing::info!(post_id = %id, caller_id = %caller.id, "Post deleted");
        Ok(())
    }

    /// Load the live post and check the caller may modify it.
    /// A missing post is reported before any ownership failure.
    async fn authorize(&self, id: Uuid, caller: &Identity) -> Result<Post, DomainError> {
        let post = self.get_by_id(id).await?;

        if post.is_deleted() {
            return Err(DomainError::NotFound {
                entity_type: ENTITY,
                id,
            });
        }

        if !caller.can_modify(post.author.id) {
            tracing::warn!(post_id = %id, caller_id = %caller.id, "Post modification refused");
            return Err(DomainError::Forbidden {
                entity_type: ENTITY,
                id,
            });
        }

        Ok(post)
    }
}

fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation("Title must not be empty".to_string()));
    }
    Ok(())
}
