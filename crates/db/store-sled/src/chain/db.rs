use bitcoin::Txid;
use overseer_db_types::{traits::*, types::ChainWriteBatch, DbError, DbResult};
use overseer_primitives::{ChainEntry, ChainPosition};
use sled::{
    transaction::{ConflictableTransactionError, ConflictableTransactionResult},
    Transactional,
};
use tracing::*;

use super::schemas::{
    decode_position, decode_txid, decode_u64, encode_txid, encode_u64, ChainMetaSchema,
    ChainPositionSchema, ChainTxPositionSchema, BLOCK_HEIGHT_KEY,
};
use crate::{
    define_sled_database,
    utils::{to_db_error, tx_to_db_error},
};

define_sled_database!(
    pub struct ChainDBSled {
        position_tree: ChainPositionSchema,
        txid_tree: ChainTxPositionSchema,
        meta_tree: ChainMetaSchema,
    }
);

fn decode_entry(key: &[u8], value: &[u8]) -> DbResult<ChainEntry> {
    Ok(ChainEntry::new(decode_position(key)?, decode_txid(value)?))
}

impl ChainDatabase for ChainDBSled {
    fn get_position_by_txid(&self, txid: &Txid) -> DbResult<Option<ChainPosition>> {
        let key = encode_txid(txid);
        self.txid_tree
            .get(&key[..])
            .map_err(to_db_error)?
            .map(|v| decode_position(&v))
            .transpose()
    }

    fn get_entry_at(&self, position: ChainPosition) -> DbResult<Option<ChainEntry>> {
        let key = encode_u64(position);
        self.position_tree
            .get(&key[..])
            .map_err(to_db_error)?
            .map(|v| decode_txid(&v).map(|txid| ChainEntry::new(position, txid)))
            .transpose()
    }

    fn get_chain_tip(&self) -> DbResult<Option<ChainEntry>> {
        self.position_tree
            .last()
            .map_err(to_db_error)?
            .map(|(k, v)| decode_entry(&k, &v))
            .transpose()
    }

    fn get_entries_range(
        &self,
        start: ChainPosition,
        end: ChainPosition,
    ) -> DbResult<Vec<ChainEntry>> {
        if start >= end {
            return Ok(Vec::new());
        }

        let start_key = encode_u64(start);
        let end_key = encode_u64(end);
        let mut result = Vec::new();
        for item in self.position_tree.range(&start_key[..]..&end_key[..]) {
            let (k, v) = item.map_err(to_db_error)?;
            result.push(decode_entry(&k, &v)?);
        }
        Ok(result)
    }

    fn get_processed_height(&self) -> DbResult<Option<u64>> {
        self.meta_tree
            .get(BLOCK_HEIGHT_KEY)
            .map_err(to_db_error)?
            .map(|v| decode_u64(&v))
            .transpose()
    }

    fn commit_batch(&self, batch: ChainWriteBatch) -> DbResult<()> {
        let flush = self.config.flush_on_commit;
        (&self.position_tree, &self.txid_tree, &self.meta_tree)
            .transaction(|(pt, tt, mt)| -> ConflictableTransactionResult<(), DbError> {
                for entry in batch.entries() {
                    let pos_key = encode_u64(entry.position());
                    let txid_key = encode_txid(entry.txid());

                    // Reads inside the transaction also see earlier writes of
                    // this batch.
                    if pt.get(&pos_key[..])?.is_some() {
                        return Err(ConflictableTransactionError::Abort(
                            DbError::PositionConflict(entry.position()),
                        ));
                    }
                    if tt.get(&txid_key[..])?.is_some() {
                        return Err(ConflictableTransactionError::Abort(DbError::TxidConflict(
                            *entry.txid(),
                        )));
                    }

                    pt.insert(&pos_key[..], &txid_key[..])?;
                    tt.insert(&txid_key[..], &pos_key[..])?;
                }

                if let Some(height) = batch.height() {
                    mt.insert(BLOCK_HEIGHT_KEY, &encode_u64(height)[..])?;
                }

                // Durable before the transaction returns, so a failed flush
                // never leaves a visible batch behind an error.
                if flush {
                    pt.flush();
                }

                Ok(())
            })
            .map_err(tx_to_db_error)?;

        trace!(entries = %batch.entries().len(), height = ?batch.height(), "committed chain batch");
        Ok(())
    }
}
