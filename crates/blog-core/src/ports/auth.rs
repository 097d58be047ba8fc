//! Authentication ports.

use std::fmt;

use async_trait::async_trait;

use crate::domain::Account;
use crate::error::RepoError;

/// Username/secret pair taken from the request (HTTP Basic).
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"***")
            .finish()
    }
}

/// Account lookup used to authenticate callers.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find an account by its login name. Soft-deleted accounts are returned too;
    /// deciding what to do with them is the caller's business.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepoError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing credentials")]
    MissingCredentials,

    #[error("Malformed credentials: {0}")]
    MalformedCredentials(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credential store error: {0}")]
    Backend(String),
}

impl From<RepoError> for AuthError {
    fn from(err: RepoError) -> Self {
        AuthError::Backend(err.to_string())
    }
}
