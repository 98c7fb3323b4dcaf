//! Extraction of canonical chain commitments from base-chain transactions.

pub mod filter;
