use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bulk enrichment and startup prewarming
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BulkConfig {
    /// Domains enriched concurrently per chunk (default: 8)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Pause between chunks in milliseconds (default: 50)
    #[serde(default = "default_chunk_delay")]
    pub chunk_delay_ms: u64,

    /// Newest domains fetched at startup, 0 disables prewarming (default: 30)
    #[serde(default = "default_prewarm_limit")]
    pub prewarm_limit: usize,

    #[serde(default = "default_prewarm_batch_size")]
    pub prewarm_batch_size: usize,

    #[serde(default = "default_prewarm_pause")]
    pub prewarm_pause_ms: u64,
}

impl BulkConfig {
    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }

    pub fn prewarm_pause(&self) -> Duration {
        Duration::from_millis(self.prewarm_pause_ms)
    }
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_delay_ms: default_chunk_delay(),
            prewarm_limit: default_prewarm_limit(),
            prewarm_batch_size: default_prewarm_batch_size(),
            prewarm_pause_ms: default_prewarm_pause(),
        }
    }
}

fn default_chunk_size() -> usize {
    8
}

fn default_chunk_delay() -> u64 {
    50
}

fn default_prewarm_limit() -> usize {
    30
}

fn default_prewarm_batch_size() -> usize {
    5
}

fn default_prewarm_pause() -> u64 {
    200
}
