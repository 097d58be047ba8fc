//! Domain entities - the core business objects.

mod account;
mod identity;
mod pagination;
mod post;
mod record;

pub use account::{Account, Role};
pub use identity::Identity;
pub use pagination::{ListMetadata, Page};
pub use post::{BasicUser, Post};
pub use record::Record;
