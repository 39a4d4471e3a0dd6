use serde::{Deserialize, Serialize};

/// Background DNS refresh queue
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RefreshConfig {
    /// Seconds between drains (default: 5)
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Hostnames resolved per drain (default: 3)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            batch_size: default_batch_size(),
        }
    }
}

fn default_interval() -> u64 {
    5
}

fn default_batch_size() -> usize {
    3
}
