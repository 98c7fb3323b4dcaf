//! Input from Bitcoin, feeding base-chain blocks into the chain index.

pub mod reader;
