//! # Blog Core
//!
//! The domain layer of the blog platform.
//! Accounts, posts, the ownership rule, and the services that enforce it.
//! This crate has zero infrastructure dependencies; storage is reached through [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
