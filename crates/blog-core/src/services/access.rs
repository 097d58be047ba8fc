//! Access resolver - turns request credentials into an [`Identity`].

use std::sync::Arc;

use crate::domain::{Identity, Record};
use crate::ports::{AuthError, CredentialStore, Credentials};

/// Confirms credentials against the credential store.
#[derive(Clone)]
pub struct AccessResolver {
    store: Arc<dyn CredentialStore>,
}

impl AccessResolver {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Resolve the caller for one request.
    ///
    /// Soft-deleted accounts do not authenticate, even with their original secret.
    pub async fn resolve(&self, credentials: Option<Credentials>) -> Result<Identity, AuthError> {
        let credentials = credentials.ok_or(AuthError::MissingCredentials)?;

        let Some(account) = self.store.find_by_username(&credentials.username).await? else {
            tracing::debug!(username = %credentials.username, "Unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        if account.is_deleted() {
            tracing::warn!(account_id = %account.id, "Login attempt on deleted account");
            return Err(AuthError::InvalidCredentials);
        }

        if account.password != credentials.secret {
            tracing::debug!(account_id = %account.id, "Secret mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Identity::from(&account))
    }
}
