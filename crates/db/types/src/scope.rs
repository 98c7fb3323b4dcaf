//! Atomic write scope over a [`ChainDatabase`].
//!
//! A scope buffers every write of one unit of work in a [`ChainWriteBatch`] and
//! answers reads through that buffer, so later decisions in the same unit see
//! earlier ones.  Nothing reaches the backend until [`ChainScope::commit`];
//! rolling back or dropping the scope discards the buffer.

use std::{fmt, mem};

use bitcoin::Txid;
use overseer_primitives::{ChainEntry, ChainPosition, ChainProgress, GENESIS_POSITION};
use tracing::*;

use crate::{traits::ChainDatabase, types::ChainWriteBatch, DbError, DbResult};

pub struct ChainScope<'db, D: ?Sized> {
    db: &'db D,
    batch: ChainWriteBatch,
    finished: bool,
}

impl<'db, D: ChainDatabase + ?Sized> ChainScope<'db, D> {
    pub fn new(db: &'db D) -> Self {
        Self {
            db,
            batch: ChainWriteBatch::new(),
            finished: false,
        }
    }

    /// Chain progress including writes staged in this scope.
    pub fn progress(&self) -> DbResult<ChainProgress> {
        if self.batch.has_position(GENESIS_POSITION) {
            return Ok(ChainProgress::started());
        }

        let started = self.db.get_entry_at(GENESIS_POSITION)?.is_some();
        Ok(ChainProgress::new(started))
    }

    /// Looks up the position of a transaction, staged or committed.
    pub fn lookup_position(&self, txid: &Txid) -> DbResult<Option<ChainPosition>> {
        if let Some(position) = self.batch.get_position(txid) {
            return Ok(Some(position));
        }

        self.db.get_position_by_txid(txid)
    }

    /// Stages a new entry.
    ///
    /// Fails with [`DbError::TxidConflict`] or [`DbError::PositionConflict`] if
    /// either half of the entry is already taken, staged or committed.
    pub fn insert_entry(&mut self, entry: ChainEntry) -> DbResult<()> {
        if self.lookup_position(entry.txid())?.is_some() {
            return Err(DbError::TxidConflict(*entry.txid()));
        }

        let position = entry.position();
        if self.batch.has_position(position) || self.db.get_entry_at(position)?.is_some() {
            return Err(DbError::PositionConflict(position));
        }

        self.batch.push_entry(entry);
        Ok(())
    }

    /// Stages the processed height.
    pub fn set_height(&mut self, height: u64) -> DbResult<()> {
        self.batch.set_height(height);
        Ok(())
    }

    /// Writes staged so far.
    pub fn pending(&self) -> &ChainWriteBatch {
        &self.batch
    }

    /// Hands the staged writes to the backend as one atomic batch.
    pub fn commit(mut self) -> DbResult<()> {
        self.finished = true;
        let batch = mem::take(&mut self.batch);
        let entries = batch.entries().len();
        self.db.commit_batch(batch)?;
        trace!(%entries, "committed chain scope");
        Ok(())
    }

    /// Discards the staged writes.
    pub fn rollback(mut self) {
        self.discard();
    }

    fn discard(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        let batch = mem::take(&mut self.batch);
        if !batch.is_empty() {
            debug!(entries = %batch.entries().len(), "rolled back chain scope");
        }
    }
}

impl<D: ?Sized> Drop for ChainScope<'_, D> {
    fn drop(&mut self) {
        if !self.finished && !self.batch.is_empty() {
            debug!(entries = %self.batch.entries().len(), "dropped uncommitted chain scope");
        }
    }
}

impl<D: ?Sized> fmt::Debug for ChainScope<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainScope")
            .field("batch", &self.batch)
            .field("finished", &self.finished)
            .finish()
    }
}
