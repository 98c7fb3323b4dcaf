use serde::{Deserialize, Serialize};

/// Default value for `client_poll_dur_ms` in [`ReaderConfig`].
const DEFAULT_CLIENT_POLL_DUR_MS: u32 = 1000;

fn default_client_poll_dur_ms() -> u32 {
    DEFAULT_CLIENT_POLL_DUR_MS
}

/// Configuration for the block reader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// How often to poll the node for a new tip, in ms.
    #[serde(default = "default_client_poll_dur_ms")]
    pub client_poll_dur_ms: u32,

    /// Height to start from when the database has never processed a block.
    #[serde(default)]
    pub start_height: u64,

    /// Number of blocks to stay behind the node tip.
    #[serde(default)]
    pub follow_distance: u64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            client_poll_dur_ms: DEFAULT_CLIENT_POLL_DUR_MS,
            start_height: 0,
            follow_distance: 0,
        }
    }
}
