use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::Identity;
use super::record::Record;

/// Author snapshot captured when a post is created.
/// Not refreshed when the account's username changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicUser {
    pub id: Uuid,
    pub username: String,
}

impl From<&Identity> for BasicUser {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username.clone(),
        }
    }
}

/// Post entity - represents a blog post or article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: BasicUser,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new post authored by `author`.
    pub fn new(title: String, content: String, author: &Identity) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            author: BasicUser::from(author),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Full replacement of the editable fields. Identity, author and
    /// creation time carry over from `self`.
    pub fn revised(&self, title: String, content: String) -> Self {
        Self {
            id: self.id,
            title,
            content,
            author: self.author.clone(),
            created_at: self.created_at,
            updated_at: Utc::now(),
            deleted_at: self.deleted_at,
        }
    }
}

impl Record for Post {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
    }
}
