//! Chain tip extension.
//!
//! Walks the candidate commitments of a block and appends every one that
//! legitimately extends the canonical chain to a [`ChainScope`].

use std::fmt;

use bitcoin::{Amount, Transaction};
use overseer_db_types::{scope::ChainScope, traits::ChainDatabase, DbResult};
use overseer_l1tx::filter::{
    indexer::{index_tx, CommitmentCandidate},
    types::CommitmentFilterConfig,
};
use overseer_primitives::{ChainEntry, ChainParams, ChainPosition, ChainProgress, GENESIS_POSITION};
use tracing::*;

/// Why a candidate commitment was not accepted.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RejectReason {
    /// Spends a recorded entry but the commitment is not output 0.
    NotFirstOutput,

    /// Would be genesis but carries the wrong value.
    WrongGenesisAmount,

    /// Spends nothing recorded after the chain has started.
    NotCanonical,

    /// Transaction has no inputs, so no back-reference.
    NoInputs,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotFirstOutput => "commitment is not the first output",
            Self::WrongGenesisAmount => "wrong genesis amount",
            Self::NotCanonical => "non-canonical transaction",
            Self::NoInputs => "transaction has no inputs",
        };
        f.write_str(s)
    }
}

/// Outcome of evaluating one candidate against the chain.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Decision {
    Accept(ChainPosition),
    Reject(RejectReason),
}

/// Decides whether a candidate extends the chain.
///
/// `predecessor` is the recorded position of the candidate's back-reference, if
/// it has one.
pub fn decide(
    candidate: &CommitmentCandidate,
    predecessor: Option<ChainPosition>,
    progress: ChainProgress,
    genesis_amount: Amount,
) -> Decision {
    if candidate.back_ref.is_none() {
        return Decision::Reject(RejectReason::NoInputs);
    }

    match predecessor {
        Some(pos) if candidate.is_first_output() => Decision::Accept(pos + 1),
        Some(_) => Decision::Reject(RejectReason::NotFirstOutput),
        None if progress.is_started() => Decision::Reject(RejectReason::NotCanonical),
        None if candidate.amount == genesis_amount => Decision::Accept(GENESIS_POSITION),
        None => Decision::Reject(RejectReason::WrongGenesisAmount),
    }
}

/// What happened to the candidates of one block.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExtensionReport {
    accepted: Vec<ChainEntry>,
    conflicts: usize,
    rejections: usize,
}

impl ExtensionReport {
    /// Entries accepted, in acceptance order.
    pub fn accepted(&self) -> &[ChainEntry] {
        &self.accepted
    }

    /// Candidates skipped because their position or txid was already taken.
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }

    pub fn rejections(&self) -> usize {
        self.rejections
    }
}

/// Extends the canonical chain from the candidate commitments in a block.
#[derive(Clone, Debug)]
pub struct ChainTipExtender {
    filter: CommitmentFilterConfig,
}

impl ChainTipExtender {
    pub fn new(filter: CommitmentFilterConfig) -> Self {
        Self { filter }
    }

    pub fn from_params(params: &ChainParams) -> Self {
        Self::new(CommitmentFilterConfig::derive_from(params))
    }

    /// Stages every accepted entry from `txs` into `scope`.
    ///
    /// Every candidate goes through [`decide`] first, a txid that is already
    /// recorded only counts as a conflict when the decision accepts it.
    /// Conflicts and rejections are counted in the report.  Any other database
    /// error is returned immediately, leaving the scope for the caller to
    /// discard.
    pub fn extend<D: ChainDatabase + ?Sized>(
        &self,
        scope: &mut ChainScope<'_, D>,
        txs: &[Transaction],
    ) -> DbResult<ExtensionReport> {
        let mut report = ExtensionReport::default();
        let mut progress = scope.progress()?;

        for tx in txs {
            for candidate in index_tx(tx, &self.filter) {
                let txid = candidate.txid;
                let vout = candidate.vout;

                let recorded = scope.lookup_position(&txid)?;
                let predecessor = match candidate.back_ref {
                    Some(back_ref) => scope.lookup_position(&back_ref)?,
                    None => None,
                };

                // A recorded genesis is judged as it was before the chain
                // started, so seeing it again resolves to a conflict.
                let judged_progress = match recorded {
                    Some(_) if predecessor.is_none() => ChainProgress::not_started(),
                    _ => progress,
                };

                let position = match decide(
                    &candidate,
                    predecessor,
                    judged_progress,
                    self.filter.genesis_amount,
                ) {
                    Decision::Accept(position) => position,
                    Decision::Reject(reason) => {
                        warn!(%txid, %vout, %reason, "ignoring commitment");
                        report.rejections += 1;
                        continue;
                    }
                };

                // Already recorded, most likely a block seen before.
                if let Some(pos) = recorded {
                    debug!(%txid, %vout, %pos, "commitment already recorded");
                    report.conflicts += 1;
                    continue;
                }

                let entry = ChainEntry::new(position, txid);
                match scope.insert_entry(entry) {
                    Ok(()) => {
                        info!(%txid, %position, "new chain tip found");
                        report.accepted.push(entry);
                        progress = ChainProgress::started();
                    }
                    Err(e) if e.is_conflict() => {
                        debug!(%txid, %position, err = %e, "lost chain position race");
                        report.conflicts += 1;
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(report)
    }
}
