// Configuration constants
pub(crate) const DEFAULT_CACHE_CAPACITY: u64 = 64 * 1024 * 1024;
pub(crate) const TEST_CACHE_CAPACITY: u64 = 4 * 1024 * 1024;

/// database operations configuration
#[derive(Debug, Clone)]
pub struct SledDbConfig {
    /// Flush to disk after every committed batch.
    pub flush_on_commit: bool,

    /// Page cache size in bytes.
    pub cache_capacity: u64,
}

impl SledDbConfig {
    pub fn new(flush_on_commit: bool, cache_capacity: u64) -> Self {
        Self {
            flush_on_commit,
            cache_capacity,
        }
    }

    /// Create production configuration with default values
    pub fn production() -> Self {
        Self::new(true, DEFAULT_CACHE_CAPACITY)
    }

    /// Create test configuration, skipping the flush after each commit
    pub fn test() -> Self {
        Self::new(false, TEST_CACHE_CAPACITY)
    }

    pub fn with_flush_on_commit(mut self, flush_on_commit: bool) -> Self {
        self.flush_on_commit = flush_on_commit;
        self
    }
}

impl Default for SledDbConfig {
    fn default() -> Self {
        Self::production()
    }
}
