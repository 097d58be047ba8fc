//! Application configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use blog_infra::DatabaseConfig;

/// Page size used when a listing request omits `limit`.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Application configuration. Built once at startup and passed down by reference.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs on the in-memory store.
    pub database: Option<DatabaseConfig>,
    /// Admin account to create at startup if it does not exist yet.
    pub admin: Option<AdminSeed>,
    pub default_page_limit: i64,
}

/// Credentials of the bootstrap admin account.
#[derive(Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSeed")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let database = get("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .map(|url| DatabaseConfig {
                url,
                max_connections: parsed(&get, "DB_MAX_CONNECTIONS").unwrap_or(100),
                min_connections: parsed(&get, "DB_MIN_CONNECTIONS").unwrap_or(10),
                connect_timeout: Duration::from_secs(
                    parsed(&get, "DB_CONNECT_TIMEOUT_SECS").unwrap_or(10),
                ),
            });

        // Both halves are required; a lone username is ignored.
        let admin = match (get("ADMIN_USERNAME"), get("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(AdminSeed { username, password })
            }
            _ => None,
        };

        Self {
            host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parsed(&get, "PORT").unwrap_or(8080),
            database,
            admin,
            default_page_limit: parsed(&get, "DEFAULT_PAGE_LIMIT").unwrap_or(DEFAULT_PAGE_LIMIT),
        }
    }
}

/// Unparseable values fall back to the default like absent ones.
fn parsed<T: FromStr>(get: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    get(key).and_then(|s| s.trim().parse().ok())
}
