//! Database abstractions for the overseer chain index.
//!
//! Backends implement [`traits::ChainDatabase`]; all writes go through a
//! [`scope::ChainScope`] so one block's mutations land in a single atomic
//! commit.

pub mod errors;
pub mod scope;
pub mod traits;
pub mod types;

#[cfg(feature = "stubs")]
pub mod stubs;

pub use errors::*;

pub type DbResult<T> = Result<T, DbError>;
