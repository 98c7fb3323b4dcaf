use std::sync::Arc;

use anyhow::Context;
use argh::FromArgs;
use bitcoind_async_client::{Auth, Client};
use overseer_btcio::reader::chain_reader_task;
use overseer_chaintsn::BlockProcessor;
use overseer_config::{BitcoindConfig, Config};
use tokio::{runtime, signal};
use tracing::*;

use crate::db::open_chain_db;

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "run")]
/// Follow the bitcoind node and index the chain until interrupted
pub(crate) struct RunArgs {}

pub(crate) fn run(config: &Config, _args: RunArgs) -> anyhow::Result<()> {
    // Start runtime for async IO tasks.
    let runtime = runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("overseer-rt")
        .build()
        .context("init: build rt")?;

    let db = open_chain_db(config)?;
    let processor = Arc::new(BlockProcessor::new(db, config.chain.clone()));
    let client = create_bitcoin_rpc_client(&config.bitcoind)?;
    let reader_config = Arc::new(config.reader.clone());

    info!(
        datadir = %config.client.datadir.display(),
        bitcoind = %config.bitcoind.rpc_url,
        "starting overseer"
    );

    runtime.block_on(async move {
        tokio::select! {
            res = chain_reader_task(client, processor, reader_config) => res,
            res = signal::ctrl_c() => {
                res.context("listening for ctrl-c")?;
                info!("received interrupt, shutting down");
                Ok(())
            }
        }
    })
}

/// Bitcoin client initialization
fn create_bitcoin_rpc_client(config: &BitcoindConfig) -> anyhow::Result<Arc<Client>> {
    let auth = Auth::UserPass(config.rpc_user.clone(), config.rpc_password.clone());
    let btc_rpc = Client::new(
        config.rpc_url.clone(),
        auth,
        config.retry_count.map(u16::from),
        config.retry_interval,
        None,
    )
    .map_err(|e| anyhow::anyhow!("failed to create bitcoin client: {e}"))?;

    info!(network = %config.network, "created bitcoin rpc client");
    Ok(Arc::new(btc_rpc))
}
