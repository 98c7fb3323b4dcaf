use std::{sync::Arc, time::Duration};

use overseer_chaintsn::{BlockApplyOutput, BlockProcessor};
use overseer_config::ReaderConfig;
use overseer_db_types::traits::ChainDatabase;
use tokio::{task, time};
use tracing::*;

use crate::reader::source::BlockSource;

/// Context that encapsulates common items needed for the chain reader.
pub(crate) struct ReaderContext<S, D> {
    /// Block source, usually a bitcoind client
    pub source: Arc<S>,

    /// Applies fetched blocks to the chain database
    pub processor: Arc<BlockProcessor<D>>,

    /// Config
    pub config: Arc<ReaderConfig>,
}

/// The main task that resumes from the persisted height and keeps applying
/// blocks from the source.
pub async fn chain_reader_task<S: BlockSource, D: ChainDatabase>(
    source: Arc<S>,
    processor: Arc<BlockProcessor<D>>,
    config: Arc<ReaderConfig>,
) -> anyhow::Result<()> {
    let next_height = calculate_next_height(processor.db().as_ref(), config.start_height)?;

    let ctx = ReaderContext {
        source,
        processor,
        config,
    };
    do_reader_task(ctx, next_height).await
}

/// Calculates the next height to apply.
pub(crate) fn calculate_next_height(
    db: &impl ChainDatabase,
    start_height: u64,
) -> anyhow::Result<u64> {
    let next_height = db
        .get_processed_height()?
        .map(|height| height + 1)
        .unwrap_or(start_height);
    Ok(next_height)
}

/// Inner function that actually does the reading task.
async fn do_reader_task<S: BlockSource, D: ChainDatabase>(
    ctx: ReaderContext<S, D>,
    mut next_height: u64,
) -> anyhow::Result<()> {
    info!(%next_height, "started chain reader task");

    let poll_dur = Duration::from_millis(ctx.config.client_poll_dur_ms as u64);

    loop {
        match poll_for_new_blocks(&ctx, next_height).await {
            Ok(new_next_height) => next_height = new_next_height,
            Err(err) => handle_poll_error(&err),
        }

        time::sleep(poll_dur).await;
    }
}

/// Handles errors encountered during polling.
fn handle_poll_error(err: &anyhow::Error) {
    warn!(%err, "failed to poll block source");
}

/// Polls the source and applies every block up to the tip minus the follow
/// distance.  Returns the next height to apply.
///
/// A failed fetch or apply stops the pass, the next poll retries from the
/// same height.
pub(crate) async fn poll_for_new_blocks<S: BlockSource, D: ChainDatabase>(
    ctx: &ReaderContext<S, D>,
    next_height: u64,
) -> anyhow::Result<u64> {
    let client_height = ctx.source.tip_height().await?;
    let Some(target_height) = client_height.checked_sub(ctx.config.follow_distance) else {
        trace!(%client_height, "source still within follow distance");
        return Ok(next_height);
    };

    if next_height > target_height {
        trace!("polled client, nothing to do");
        return Ok(next_height);
    }

    debug!(%client_height, %target_height, "have new blocks");

    let mut cur_height = next_height;
    while cur_height <= target_height {
        match fetch_and_apply_block(ctx, cur_height).await {
            Ok(output) => {
                let accepted = output.report.accepted().len();
                info!(height = %cur_height, %accepted, "applied new block");
                cur_height += 1;
            }
            Err(e) => {
                warn!(height = %cur_height, err = %e, "failed to apply new block");
                break;
            }
        }
    }

    Ok(cur_height)
}

/// Fetches a block at given height and applies it on the blocking pool.
async fn fetch_and_apply_block<S: BlockSource, D: ChainDatabase>(
    ctx: &ReaderContext<S, D>,
    height: u64,
) -> anyhow::Result<BlockApplyOutput> {
    let block = ctx.source.block_at(height).await?;
    let blkid = block.block_hash();
    trace!(%height, %blkid, txs = %block.txdata.len(), "fetched block from client");

    let processor = ctx.processor.clone();
    let output = task::spawn_blocking(move || processor.apply_block(height, &block)).await??;
    Ok(output)
}
