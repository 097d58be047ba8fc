//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::domain::{Account, Role};
use blog_core::error::RepoError;
use blog_core::ports::{AccountRepository, PostRepository};
use blog_core::services::{AccessResolver, AccountService, PostService};
use blog_infra::{InMemoryAccountRepository, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use blog_infra::{PostgresAccountRepository, PostgresPostRepository};

use crate::config::{AdminSeed, AppConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub posts: PostService,
    pub resolver: AccessResolver,
    pub default_page_limit: i64,
    /// Name of the active storage backend, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match blog_infra::database::connect(db_config).await {
                    Ok(conn) => {
                        let accounts = Arc::new(PostgresAccountRepository::new(conn.clone()));
                        let posts = Arc::new(PostgresPostRepository::new(conn));
                        return Self::bootstrap(accounts, posts, config, "postgres").await;
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        if config.database.is_some() {
            tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
        }

        let accounts = Arc::new(InMemoryAccountRepository::new());
        let posts = Arc::new(InMemoryPostRepository::new());
        Self::bootstrap(accounts, posts, config, "memory").await
    }

    /// Fresh in-memory state with the default page size.
    #[cfg(test)]
    pub fn in_memory() -> (Self, Arc<InMemoryAccountRepository>) {
        let accounts = Arc::new(InMemoryAccountRepository::new());
        let posts = Arc::new(InMemoryPostRepository::new());
        let state = Self::from_repositories(
            accounts.clone(),
            posts,
            crate::config::DEFAULT_PAGE_LIMIT,
            "memory",
        );
        (state, accounts)
    }

    /// Wire services over a pair of repositories.
    ///
    /// The account repository backs both the account service and the
    /// access resolver.
    pub fn from_repositories<A, P>(
        accounts: Arc<A>,
        posts: Arc<P>,
        default_page_limit: i64,
        storage: &'static str,
    ) -> Self
    where
        A: AccountRepository + 'static,
        P: PostRepository + 'static,
    {
        Self {
            accounts: AccountService::new(accounts.clone()),
            posts: PostService::new(posts),
            resolver: AccessResolver::new(accounts),
            default_page_limit,
            storage,
        }
    }

    async fn bootstrap<A, P>(
        accounts: Arc<A>,
        posts: Arc<P>,
        config: &AppConfig,
        storage: &'static str,
    ) -> Self
    where
        A: AccountRepository + 'static,
        P: PostRepository + 'static,
    {
        if let Some(seed) = &config.admin {
            if let Err(e) = seed_admin(accounts.as_ref(), seed).await {
                tracing::error!(username = %seed.username, "Failed to seed admin account: {}", e);
            }
        }

        tracing::info!(storage, "Application state initialized");
        Self::from_repositories(accounts, posts, config.default_page_limit, storage)
    }
}

/// Insert the bootstrap admin unless an account with that username exists.
///
/// Goes straight to the repository: account signup always yields plain users.
pub async fn seed_admin(repo: &dyn AccountRepository, seed: &AdminSeed) -> Result<(), RepoError> {
    if repo.find_by_username(&seed.username).await?.is_some() {
        tracing::debug!(username = %seed.username, "Admin account already present");
        return Ok(());
    }

    let admin = Account::new(seed.username.clone(), seed.password.clone(), Role::Admin);
    let id = admin.id;
    repo.create(admin).await?;

    tracing::info!(account_id = %id, username = %seed.username, "Admin account seeded");
    Ok(())
}
