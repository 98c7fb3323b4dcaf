use bitcoin::{Transaction, TxOut};

pub mod indexer;
pub mod types;

use types::CommitmentFilterConfig;

/// Finds outputs of a transaction that are candidate commitments, with their
/// output index.
pub fn find_commitment_outputs<'tx>(
    tx: &'tx Transaction,
    filter_conf: &'tx CommitmentFilterConfig,
) -> impl Iterator<Item = (u32, &'tx TxOut)> + 'tx {
    tx.output
        .iter()
        .enumerate()
        .filter(|(_, txout)| filter_conf.matches(txout))
        .map(|(vout, txout)| (vout as u32, txout))
}
