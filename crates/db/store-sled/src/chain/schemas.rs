use bitcoin::{hashes::Hash, Txid};
use overseer_db_types::{DbError, DbResult};
use overseer_primitives::ChainPosition;

use crate::define_table;

define_table!(
    /// A table to store the canonical chain. Maps big-endian position to the
    /// 32 txid bytes
    (ChainPositionSchema)
);

define_table!(
    /// A table to look up recorded transactions. Maps the 32 txid bytes to the
    /// big-endian position
    (ChainTxPositionSchema)
);

define_table!(
    /// A table for processing progress. Maps a field name to a big-endian u64
    (ChainMetaSchema)
);

/// Key in [`ChainMetaSchema`] holding the last fully applied block height.
pub(crate) const BLOCK_HEIGHT_KEY: &[u8] = b"blockheight";

/// Positions are stored big-endian so tree order is chain order.
pub(crate) fn encode_u64(v: u64) -> [u8; 8] {
    v.to_be_bytes()
}

pub(crate) fn decode_u64(data: &[u8]) -> DbResult<u64> {
    let buf: [u8; 8] = data
        .try_into()
        .map_err(|_| DbError::CodecError(format!("expected 8 bytes, got {}", data.len())))?;
    Ok(u64::from_be_bytes(buf))
}

pub(crate) fn encode_txid(txid: &Txid) -> [u8; 32] {
    txid.to_byte_array()
}

pub(crate) fn decode_txid(data: &[u8]) -> DbResult<Txid> {
    let buf: [u8; 32] = data
        .try_into()
        .map_err(|_| DbError::CodecError(format!("expected 32 byte txid, got {}", data.len())))?;
    Ok(Txid::from_byte_array(buf))
}

pub(crate) fn decode_position(data: &[u8]) -> DbResult<ChainPosition> {
    decode_u64(data)
}
