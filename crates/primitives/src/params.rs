//! Parameters that define which base-chain outputs belong to the canonical chain.

use bitcoin::Amount;
use serde::{Deserialize, Serialize};

use crate::errors::ParamsError;

/// Length of a canonical single-recipient commitment script (a P2WPKH output:
/// `OP_0 <20-byte key hash>`).
pub const DEFAULT_COMMITMENT_SCRIPT_LEN: usize = 22;

fn default_commitment_script_len() -> usize {
    DEFAULT_COMMITMENT_SCRIPT_LEN
}

/// Chain parameters, fixed at startup.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChainParams {
    /// Byte pattern a commitment output's locking script must end with. This is
    /// the designated recipient identity of the chain, usually a key hash.
    #[serde(with = "hex::serde")]
    commitment_suffix: Vec<u8>,

    /// Exact total length a commitment output's locking script must have.
    #[serde(default = "default_commitment_script_len")]
    commitment_script_len: usize,

    /// Exact value in sats the genesis commitment output must carry.
    genesis_amount: u64,
}

impl ChainParams {
    pub fn new(
        commitment_suffix: Vec<u8>,
        commitment_script_len: usize,
        genesis_amount: Amount,
    ) -> Self {
        Self {
            commitment_suffix,
            commitment_script_len,
            genesis_amount: genesis_amount.to_sat(),
        }
    }

    pub fn commitment_suffix(&self) -> &[u8] {
        &self.commitment_suffix
    }

    pub fn commitment_script_len(&self) -> usize {
        self.commitment_script_len
    }

    pub fn genesis_amount(&self) -> Amount {
        Amount::from_sat(self.genesis_amount)
    }

    /// Checks the parameters can ever match an output.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.commitment_suffix.is_empty() {
            return Err(ParamsError::EmptyCommitmentSuffix);
        }

        if self.commitment_suffix.len() > self.commitment_script_len {
            return Err(ParamsError::SuffixTooLong(
                self.commitment_suffix.len(),
                self.commitment_script_len,
            ));
        }

        if self.genesis_amount == 0 {
            return Err(ParamsError::ZeroGenesisAmount);
        }

        Ok(())
    }
}
