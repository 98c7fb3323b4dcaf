use bitcoin::consensus::encode;
use overseer_db_types::DbError;
use thiserror::Error;

/// Input that does not parse as a block.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid block hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid block encoding: {0}")]
    Block(#[from] encode::Error),
}

/// Fatal failure applying a block.  The database is left as it was before
/// the call.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("decode: {0}")]
    Decode(#[from] DecodeError),

    #[error("db: {0}")]
    Store(#[from] DbError),
}
