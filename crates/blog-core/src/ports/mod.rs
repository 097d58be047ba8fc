//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod filter;
mod repository;

pub use auth::{AuthError, CredentialStore, Credentials};
pub use filter::{AccountFilter, PostFilter, RecordFilter};
pub use repository::{AccountRepository, BaseRepository, PostRepository};
