//! Account service - signup, listing and owner-or-admin account maintenance.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Account, Identity, ListMetadata, Page, Record, Role};
use crate::error::DomainError;
use crate::ports::{AccountFilter, AccountRepository};

const ENTITY: &str = "Account";

/// Signup input. `requested_role` is accepted but never honoured.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub requested_role: Option<Role>,
}

/// Full replacement of an account's editable fields.
#[derive(Debug, Clone)]
pub struct AccountChanges {
    pub username: String,
    pub password: String,
    /// Applied only when the caller is an admin.
    pub role: Option<Role>,
}

/// Business rules for accounts.
#[derive(Clone)]
pub struct AccountService {
    repo: Arc<dyn AccountRepository>,
}

impl AccountService {
    pub fn new(repo: Arc<dyn AccountRepository>) -> Self {
        Self { repo }
    }

    /// Sign up a new account. The role is always [`Role::User`].
    pub async fn create(&self, new: NewAccount) -> Result<Account, DomainError> {
        validate(&new.username, &new.password)?;

        if let Some(role) = new.requested_role.filter(|r| *r != Role::User) {
            tracing::warn!(username = %new.username, requested_role = %role, "Ignoring requested role on signup");
        }

        let account = Account::new(new.username, new.password, Role::User);
        self.repo.create(account.clone()).await?;

        tracing::info!(account_id = %account.id, "Account created");
        Ok(account)
    }

    /// List live accounts.
    pub async fn list(&self, page: Page) -> Result<(Vec<Account>, ListMetadata), DomainError> {
        Ok(self
            .repo
            .list(AccountFilter::live(), page.offset(), page.limit)
            .await?)
    }

    /// Fetch any account by id, including soft-deleted ones.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Account, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(DomainError::lookup(ENTITY, id))
    }

    /// Replace username and password. Role changes need an admin caller.
    pub async fn update(
        &self,
        id: Uuid,
        changes: AccountChanges,
        caller: &Identity,
    ) -> Result<Account, DomainError> {
        validate(&changes.username, &changes.password)?;

        let current = self.authorize(id, caller).await?;

        let role = match changes.role {
            Some(role) if caller.is_admin() => role,
            Some(role) if role != current.role => {
                tracing::warn!(account_id = %id, caller_id = %caller.id, requested_role = %role, "Ignoring role change from non-admin");
                current.role
            }
            _ => current.role,
        };

        let updated = Account {
            id: current.id,
            username: changes.username,
            password: changes.password,
            role,
            created_at: current.created_at,
            deleted_at: current.deleted_at,
        };
        self.repo.replace(updated.clone()).await?;

        tracing::info!(account_id = %id, caller_id = %caller.id, "Account updated");
        Ok(updated)
    }

    /// Soft-delete an account.
    pub async fn delete(&self, id: Uuid, caller: &Identity) -> Result<(), DomainError> {
        self.authorize(id, caller).await?;
        self.repo.soft_delete(id).await?;

        tracing::info!(account_id = %id, caller_id = %caller.id, "Account deleted");
        Ok(())
    }

    async fn authorize(&self, id: Uuid, caller: &Identity) -> Result<Account, DomainError> {
        let account = self.get_by_id(id).await?;

        if account.is_deleted() {
            return Err(DomainError::NotFound {
                entity_type: ENTITY,
                id,
            });
        }

        if !caller.can_modify(account.id) {
            tracing::warn!(account_id = %id, caller_id = %caller.id, "Account modification refused");
            return Err(DomainError::Forbidden {
                entity_type: ENTITY,
                id,
            });
        }

        Ok(account)
    }
}

fn validate(username: &str, password: &str) -> Result<(), DomainError> {
    if username.trim().is_empty() {
        return Err(DomainError::Validation("Username must not be empty".to_string()));
    }
    if password.is_empty() {
        return Err(DomainError::Validation("Password must not be empty".to_string()));
    }
    Ok(())
}
