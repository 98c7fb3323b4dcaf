//! Atomic application of one base-chain block.

use std::sync::Arc;

use bitcoin::{consensus, Block};
use overseer_db_types::traits::ChainDatabase;
use overseer_primitives::ChainParams;
use tracing::*;

use crate::{
    errors::{DecodeError, ProcessError},
    extend::{ChainTipExtender, ExtensionReport},
};

/// Decodes a consensus-encoded block.
pub fn decode_block(raw: &[u8]) -> Result<Block, DecodeError> {
    Ok(consensus::deserialize(raw)?)
}

/// Decodes a hex-encoded block, as returned by `getblock <hash> 0`.
pub fn decode_block_hex(hex_str: &str) -> Result<Block, DecodeError> {
    let raw = hex::decode(hex_str.trim())?;
    decode_block(&raw)
}

/// Result of applying a block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BlockApplyOutput {
    pub height: u64,
    pub report: ExtensionReport,
}

/// Applies blocks to a chain database, one atomic scope per block.
#[derive(Debug)]
pub struct BlockProcessor<D> {
    db: Arc<D>,
    extender: ChainTipExtender,
}

impl<D: ChainDatabase> BlockProcessor<D> {
    pub fn new(db: Arc<D>, params: ChainParams) -> Self {
        let extender = ChainTipExtender::from_params(&params);
        Self { db, extender }
    }

    pub fn db(&self) -> &Arc<D> {
        &self.db
    }

    /// Decodes and applies a raw block at `height`.
    pub fn apply(&self, height: u64, raw: &[u8]) -> Result<BlockApplyOutput, ProcessError> {
        let block = decode_block(raw)?;
        self.apply_block(height, &block)
    }

    /// Decodes and applies a hex-encoded block at `height`.
    pub fn apply_hex(&self, height: u64, hex_str: &str) -> Result<BlockApplyOutput, ProcessError> {
        let block = decode_block_hex(hex_str)?;
        self.apply_block(height, &block)
    }

    /// Applies a decoded block at `height`.
    ///
    /// Either every accepted entry and the new processed height are committed
    /// together, or nothing is.
    pub fn apply_block(&self, height: u64, block: &Block) -> Result<BlockApplyOutput, ProcessError> {
        let blkid = block.block_hash();
        let mut scope = self.db.begin_scope();

        let report = match self.extender.extend(&mut scope, &block.txdata) {
            Ok(report) => report,
            Err(e) => {
                scope.rollback();
                error!(%height, %blkid, err = %e, "failed to extend chain, block not applied");
                return Err(e.into());
            }
        };

        scope.set_height(height)?;
        scope.commit()?;

        debug!(
            %height,
            %blkid,
            accepted = %report.accepted().len(),
            conflicts = %report.conflicts(),
            rejections = %report.rejections(),
            "applied block"
        );

        Ok(BlockApplyOutput { height, report })
    }
}
