//! Canonical chain entry types.

use std::fmt;

use bitcoin::Txid;
use serde::{Deserialize, Serialize};

/// Sequence position of an entry in the canonical chain.
pub type ChainPosition = u64;

/// Position assigned to the genesis entry.
pub const GENESIS_POSITION: ChainPosition = 1;

/// An accepted element of the canonical chain.
///
/// Entries are append-only: once recorded, neither the position nor the txid
/// is ever reassigned.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ChainEntry {
    position: ChainPosition,
    txid: Txid,
}

impl ChainEntry {
    pub fn new(position: ChainPosition, txid: Txid) -> Self {
        Self { position, txid }
    }

    /// Creates the genesis entry for a transaction.
    pub fn genesis(txid: Txid) -> Self {
        Self::new(GENESIS_POSITION, txid)
    }

    pub fn position(&self) -> ChainPosition {
        self.position
    }

    pub fn txid(&self) -> &Txid {
        &self.txid
    }

    pub fn is_genesis(&self) -> bool {
        self.position == GENESIS_POSITION
    }
}

impl fmt::Display for ChainEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.txid, self.position)
    }
}

/// Progress of the canonical chain as seen at the start of a block application.
///
/// This is derived from the store for every call rather than kept around as
/// process state.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ChainProgress {
    started: bool,
}

impl ChainProgress {
    pub fn new(started: bool) -> Self {
        Self { started }
    }

    /// Progress for a chain that has no genesis entry yet.
    pub fn not_started() -> Self {
        Self::new(false)
    }

    /// Progress for a chain with a recorded genesis entry.
    pub fn started() -> Self {
        Self::new(true)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}

#[cfg(test)]
mod tests {
    use bitcoin::hashes::Hash;

    use super::*;

    #[test]
    fn test_genesis_entry() {
        let txid = Txid::from_byte_array([7; 32]);
        let entry = ChainEntry::genesis(txid);
        assert!(entry.is_genesis());
        assert_eq!(entry.position(), GENESIS_POSITION);
        assert_eq!(entry.txid(), &txid);
    }

    #[test]
    fn test_progress_default_is_not_started() {
        assert!(!ChainProgress::default().is_started());
        assert!(ChainProgress::started().is_started());
    }
}
