//! Services - business rules layered over the ports.
//!
//! Every mutation goes through an ownership check against the caller's
//! [`Identity`](crate::domain::Identity) before it reaches storage.

mod access;
mod accounts;
mod posts;

#[cfg(test)]
mod testing;

pub use access::AccessResolver;
pub use accounts::{AccountChanges, AccountService, NewAccount};
pub use posts::{NewPost, PostChanges, PostCriteria, PostService};
