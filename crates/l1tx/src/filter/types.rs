use bitcoin::{Amount, TxOut};
use overseer_primitives::ChainParams;

/// Output-matching rule derived from the chain parameters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommitmentFilterConfig {
    /// Bytes a commitment script must end with.
    pub suffix: Vec<u8>,

    /// Exact length of a commitment script.
    pub script_len: usize,

    /// Exact value of a genesis commitment.
    pub genesis_amount: Amount,
}

impl CommitmentFilterConfig {
    pub fn derive_from(params: &ChainParams) -> Self {
        Self {
            suffix: params.commitment_suffix().to_vec(),
            script_len: params.commitment_script_len(),
            genesis_amount: params.genesis_amount(),
        }
    }

    /// Returns if the output is a candidate commitment.
    pub fn matches(&self, txout: &TxOut) -> bool {
        let script = txout.script_pubkey.as_bytes();
        script.len() == self.script_len && script.ends_with(&self.suffix)
    }
}
