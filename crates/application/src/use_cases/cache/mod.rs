mod get_stats;
mod prewarm;

pub use get_stats::{GetCacheStatsUseCase, HealthSnapshot};
pub use prewarm::{PrewarmCacheUseCase, PrewarmSummary};
