//! Canonical chain transition logic.
//!
//! Decides which commitments in a base-chain block extend the canonical chain
//! and applies each block to the chain database as one atomic unit.

pub mod block;
pub mod errors;
pub mod extend;

pub use block::{decode_block, decode_block_hex, BlockApplyOutput, BlockProcessor};
pub use errors::{DecodeError, ProcessError};
pub use extend::{ChainTipExtender, Decision, ExtensionReport, RejectReason};
