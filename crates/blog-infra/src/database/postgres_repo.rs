//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use blog_core::domain::Account;
use blog_core::error::RepoError;
use blog_core::ports::{AccountRepository, CredentialStore, PostRepository};

use super::entity::account::{self, Entity as AccountEntity};
use super::entity::post::Entity as PostEntity;
use super::postgres_base::{PostgresBaseRepository, map_db_error};

/// PostgreSQL account repository.
pub type PostgresAccountRepository = PostgresBaseRepository<AccountEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl CredentialStore for PostgresAccountRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepoError> {
        tracing::debug!(username = %username, "Finding account by username");

        let result = AccountEntity::find()
            .filter(account::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Into::into))
    }
}

impl AccountRepository for PostgresAccountRepository {}

impl PostRepository for PostgresPostRepository {}
