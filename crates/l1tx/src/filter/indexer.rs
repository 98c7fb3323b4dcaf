use bitcoin::{Amount, Transaction, Txid};

use super::{find_commitment_outputs, types::CommitmentFilterConfig};

/// A candidate commitment output found in a transaction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CommitmentCandidate {
    /// Transaction holding the output.
    pub txid: Txid,

    /// Txid spent by the transaction's first input, if it has any inputs.
    pub back_ref: Option<Txid>,

    /// Index of the output within the transaction.
    pub vout: u32,

    pub amount: Amount,
}

impl CommitmentCandidate {
    pub fn is_first_output(&self) -> bool {
        self.vout == 0
    }
}

/// Lists the candidate commitments of a transaction in output order.
pub fn index_tx(tx: &Transaction, config: &CommitmentFilterConfig) -> Vec<CommitmentCandidate> {
    let outputs: Vec<_> = find_commitment_outputs(tx, config).collect();
    if outputs.is_empty() {
        return Vec::new();
    }

    let txid = tx.compute_txid();
    let back_ref = tx.input.first().map(|txin| txin.previous_output.txid);

    outputs
        .into_iter()
        .map(|(vout, txout)| CommitmentCandidate {
            txid,
            back_ref,
            vout,
            amount: txout.value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use overseer_test_utils_btc::*;

    use super::*;

    fn config() -> CommitmentFilterConfig {
        CommitmentFilterConfig::derive_from(&test_chain_params())
    }

    #[test]
    fn test_index_tx_reports_back_ref_and_vout() {
        let prev = unrelated_txid(1);
        let tx = build_tx(
            prev,
            0,
            vec![
                unrelated_output(Amount::from_sat(10)),
                commitment_output(Amount::from_sat(20)),
            ],
        );

        let candidates = index_tx(&tx, &config());
        assert_eq!(
            candidates,
            vec![CommitmentCandidate {
                txid: tx.compute_txid(),
                back_ref: Some(prev),
                vout: 1,
                amount: Amount::from_sat(20),
            }]
        );
        assert!(!candidates[0].is_first_output());
    }

    #[test]
    fn test_index_inputless_tx_has_no_back_ref() {
        let tx = build_inputless_tx(vec![commitment_output(TEST_GENESIS_AMOUNT)]);
        let candidates = index_tx(&tx, &config());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].back_ref, None);
    }
}
