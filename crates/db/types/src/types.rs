//! Types exchanged between the chain scope and database backends.

use bitcoin::Txid;
use overseer_primitives::{ChainEntry, ChainPosition};

/// Writes staged by one chain scope, applied by a backend as a single atomic
/// unit.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ChainWriteBatch {
    /// New entries in the order they were accepted.
    entries: Vec<ChainEntry>,

    /// Processed height to record with the entries.
    height: Option<u64>,
}

impl ChainWriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    pub fn height(&self) -> Option<u64> {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.height.is_none()
    }

    /// Appends an entry without any uniqueness checks.  Backends are expected to
    /// reject the whole batch if it collides with anything.
    pub fn push_entry(&mut self, entry: ChainEntry) {
        self.entries.push(entry);
    }

    pub fn set_height(&mut self, height: u64) {
        self.height = Some(height);
    }

    /// Position of a staged entry by txid.
    pub fn get_position(&self, txid: &Txid) -> Option<ChainPosition> {
        self.entries
            .iter()
            .find(|e| e.txid() == txid)
            .map(|e| e.position())
    }

    pub fn has_position(&self, position: ChainPosition) -> bool {
        self.entries.iter().any(|e| e.position() == position)
    }
}
