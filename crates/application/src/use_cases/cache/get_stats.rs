use std::sync::Arc;

use crate::cache::DomainListCache;
use crate::ports::Clock;
use crate::services::{CertificateFetcher, DnsRefreshQueue, FetcherStats};

#[derive(Debug, Clone)]
pub struct HealthSnapshot {
    pub fetcher: FetcherStats,
    pub queue_depth: usize,
    pub queue_in_flight: usize,
    pub domain_list_cached: bool,
    pub uptime_secs: u64,
}

pub struct GetCacheStatsUseCase {
    fetcher: Arc<CertificateFetcher>,
    refresh_queue: Arc<DnsRefreshQueue>,
    list_cache: Arc<DomainListCache>,
    clock: Arc<dyn Clock>,
    started_at: u64,
}

impl GetCacheStatsUseCase {
    pub fn new(
        fetcher: Arc<CertificateFetcher>,
        refresh_queue: Arc<DnsRefreshQueue>,
        list_cache: Arc<DomainListCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let started_at = clock.now_millis();
        Self {
            fetcher,
            refresh_queue,
            list_cache,
            clock,
            started_at,
        }
    }

    pub fn execute(&self) -> HealthSnapshot {
        HealthSnapshot {
            fetcher: self.fetcher.stats(),
            queue_depth: self.refresh_queue.depth(),
            queue_in_flight: self.refresh_queue.in_flight(),
            domain_list_cached: self.list_cache.is_cached(),
            uptime_secs: self.clock.now_millis().saturating_sub(self.started_at) / 1000,
        }
    }
}
