//! Core data types for the overseer chain index.
//!
//! These are shared between the transition logic, the database layer and the
//! reader, so they are kept free of any storage or IO concerns.

pub mod chain;
pub mod errors;
pub mod params;

pub use chain::{ChainEntry, ChainPosition, ChainProgress, GENESIS_POSITION};
pub use params::{ChainParams, DEFAULT_COMMITMENT_SCRIPT_LEN};
