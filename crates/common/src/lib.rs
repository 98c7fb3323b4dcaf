//! Utilities shared by overseer binaries.

pub mod logging;
