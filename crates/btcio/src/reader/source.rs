use async_trait::async_trait;
use bitcoin::Block;
use bitcoind_async_client::{traits::Reader, Client};

/// Somewhere to fetch base-chain blocks from by height.
#[async_trait]
pub trait BlockSource: Send + Sync + 'static {
    /// Height of the best block the source knows about.
    async fn tip_height(&self) -> anyhow::Result<u64>;

    /// Block at a height on the source's best chain.
    async fn block_at(&self, height: u64) -> anyhow::Result<Block>;
}

#[async_trait]
impl BlockSource for Client {
    async fn tip_height(&self) -> anyhow::Result<u64> {
        let chain_info = self.get_blockchain_info().await?;
        Ok(u64::from(chain_info.blocks))
    }

    async fn block_at(&self, height: u64) -> anyhow::Result<Block> {
        Ok(self.get_block_at(height).await?)
    }
}
