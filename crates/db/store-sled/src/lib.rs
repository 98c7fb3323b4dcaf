//! Sled store for the overseer chain index.

pub mod chain;
mod config;
mod init;
pub mod macros;
pub mod utils;

use std::{path::Path, sync::Arc};

pub use chain::db::ChainDBSled;
pub use config::SledDbConfig;

pub use crate::init::open_sled_database;

pub const SLED_NAME: &str = "overseer";

/// Opens the chain database from datadir.
pub fn open_sled_backend(
    datadir: &Path,
    dbname: &'static str,
    ops_config: SledDbConfig,
) -> anyhow::Result<Arc<ChainDBSled>> {
    let sled_db = open_sled_database(datadir, dbname, &ops_config)?;
    ChainDBSled::new(sled_db, ops_config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize sled backend: {}", e))
        .map(Arc::new)
}
