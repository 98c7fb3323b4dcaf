//! Errors raised while validating primitive types.

use thiserror::Error;

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ParamsError {
    #[error("commitment suffix must not be empty")]
    EmptyCommitmentSuffix,

    /// (suffix len, script len)
    #[error("commitment suffix of {0} bytes does not fit a {1} byte script")]
    SuffixTooLong(usize, usize),

    #[error("genesis amount must be non-zero")]
    ZeroGenesisAmount,
}
