use std::collections::*;

use bitcoin::Txid;
use overseer_primitives::{ChainEntry, ChainPosition};
use parking_lot::Mutex;

use crate::{traits::ChainDatabase, types::ChainWriteBatch, DbError, DbResult};

/// Failures a [`StubChainDb`] can be told to produce.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StubFault {
    /// Every commit fails with an IO error.
    Commit,

    /// Looking up this txid fails with an IO error.
    Lookup(Txid),
}

#[derive(Debug, Default)]
struct StubState {
    positions: BTreeMap<ChainPosition, Txid>,
    txids: HashMap<Txid, ChainPosition>,
    height: Option<u64>,
}

/// In-memory chain database with the same commit semantics as the real
/// backends, plus fault injection.
#[derive(Debug, Default)]
pub struct StubChainDb {
    state: Mutex<StubState>,
    faults: Mutex<Vec<StubFault>>,
}

impl StubChainDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the database fail in the given way until cleared.
    pub fn inject_fault(&self, fault: StubFault) {
        self.faults.lock().push(fault);
    }

    pub fn clear_faults(&self) {
        self.faults.lock().clear();
    }

    fn has_fault(&self, fault: StubFault) -> bool {
        self.faults.lock().contains(&fault)
    }
}

impl ChainDatabase for StubChainDb {
    fn get_position_by_txid(&self, txid: &Txid) -> DbResult<Option<ChainPosition>> {
        if self.has_fault(StubFault::Lookup(*txid)) {
            return Err(DbError::IoError(format!("injected lookup fault for {txid}")));
        }

        Ok(self.state.lock().txids.get(txid).copied())
    }

    fn get_entry_at(&self, position: ChainPosition) -> DbResult<Option<ChainEntry>> {
        let state = self.state.lock();
        Ok(state
            .positions
            .get(&position)
            .map(|txid| ChainEntry::new(position, *txid)))
    }

    fn get_chain_tip(&self) -> DbResult<Option<ChainEntry>> {
        let state = self.state.lock();
        Ok(state
            .positions
            .last_key_value()
            .map(|(pos, txid)| ChainEntry::new(*pos, *txid)))
    }

    fn get_entries_range(
        &self,
        start: ChainPosition,
        end: ChainPosition,
    ) -> DbResult<Vec<ChainEntry>> {
        if start >= end {
            return Ok(Vec::new());
        }

        let state = self.state.lock();
        Ok(state
            .positions
            .range(start..end)
            .map(|(pos, txid)| ChainEntry::new(*pos, *txid))
            .collect())
    }

    fn get_processed_height(&self) -> DbResult<Option<u64>> {
        Ok(self.state.lock().height)
    }

    fn commit_batch(&self, batch: ChainWriteBatch) -> DbResult<()> {
        if self.has_fault(StubFault::Commit) {
            return Err(DbError::IoError("injected commit fault".to_owned()));
        }

        let mut state = self.state.lock();

        // Check everything before touching anything.
        let mut new_positions = HashSet::new();
        let mut new_txids = HashSet::new();
        for entry in batch.entries() {
            if state.positions.contains_key(&entry.position())
                || !new_positions.insert(entry.position())
            {
                return Err(DbError::PositionConflict(entry.position()));
            }
            if state.txids.contains_key(entry.txid()) || !new_txids.insert(*entry.txid()) {
                return Err(DbError::TxidConflict(*entry.txid()));
            }
        }

        for entry in batch.entries() {
            state.positions.insert(entry.position(), *entry.txid());
            state.txids.insert(*entry.txid(), entry.position());
        }

        if let Some(height) = batch.height() {
            state.height = Some(height);
        }

        Ok(())
    }
}
