//! SeaORM table mappings.

pub mod account;
pub mod post;
