use std::sync::Arc;

use overseer_config::Config;
use overseer_db_store_sled::{open_sled_backend, ChainDBSled, SledDbConfig, SLED_NAME};

/// Opens the chain database under the configured datadir.
pub(crate) fn open_chain_db(config: &Config) -> anyhow::Result<Arc<ChainDBSled>> {
    let ops_config =
        SledDbConfig::production().with_flush_on_commit(config.client.db_flush_on_commit);
    open_sled_backend(&config.client.datadir, SLED_NAME, ops_config)
}
