//! In-memory database implementations for tests.

pub mod chain;

pub use chain::{StubChainDb, StubFault};
