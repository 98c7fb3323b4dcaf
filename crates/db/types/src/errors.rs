use bitcoin::Txid;
use overseer_primitives::ChainPosition;
use thiserror::Error;

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum DbError {
    /// Another entry already holds this chain position.
    #[error("chain position {0} already recorded")]
    PositionConflict(ChainPosition),

    /// The transaction is already recorded at some position.
    #[error("chain transaction {0} already recorded")]
    TxidConflict(Txid),

    #[error("codec error {0}")]
    CodecError(String),

    #[error("IO Error: {0}")]
    IoError(String),
}

impl DbError {
    /// Returns if this is a benign uniqueness violation rather than a storage
    /// failure.
    ///
    /// Callers inserting chain entries may skip the candidate on a conflict but
    /// must treat every other error as fatal.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::PositionConflict(_) | Self::TxidConflict(_))
    }
}
