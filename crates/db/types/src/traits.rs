//! Trait definitions for low level database interfaces.

use bitcoin::Txid;
use overseer_primitives::{ChainEntry, ChainPosition};

use crate::{scope::ChainScope, types::ChainWriteBatch, DbResult};

/// Database interface for the canonical chain index.
///
/// Reads see only committed state.  Writes are never issued directly, they are
/// staged in a [`ChainScope`] and handed over in one [`ChainWriteBatch`].
pub trait ChainDatabase: Send + Sync + 'static {
    /// Gets the position of a recorded transaction.
    fn get_position_by_txid(&self, txid: &Txid) -> DbResult<Option<ChainPosition>>;

    /// Gets the entry recorded at a position.
    fn get_entry_at(&self, position: ChainPosition) -> DbResult<Option<ChainEntry>>;

    /// Gets the entry with the highest position.
    fn get_chain_tip(&self) -> DbResult<Option<ChainEntry>>;

    /// Returns the entries in the half-open position interval `[start, end)`.
    fn get_entries_range(
        &self,
        start: ChainPosition,
        end: ChainPosition,
    ) -> DbResult<Vec<ChainEntry>>;

    /// Gets the highest base-chain height that was fully applied.
    fn get_processed_height(&self) -> DbResult<Option<u64>>;

    /// Applies a write batch in a single atomic operation.
    ///
    /// If any entry collides with a recorded position or txid, this MUST fail
    /// with a conflict error and leave the database unchanged.  Any other
    /// failure MUST also leave the database unchanged.
    fn commit_batch(&self, batch: ChainWriteBatch) -> DbResult<()>;

    /// Opens a new atomic scope against this database.
    fn begin_scope(&self) -> ChainScope<'_, Self>
    where
        Self: Sized,
    {
        ChainScope::new(self)
    }
}
