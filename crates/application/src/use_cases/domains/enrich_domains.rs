use certwatch_domain::config::BulkConfig;
use certwatch_domain::{DomainError, EnrichedDomain, MonitoredDomain};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::cache::DomainListCache;
use crate::ports::Clock;
use crate::services::{CertificateFetcher, DnsRefreshQueue};
use crate::use_cases::dns::cached_or_enqueue;

#[derive(Debug, Clone, Copy)]
pub struct BulkSettings {
    pub chunk_size: usize,
    pub chunk_delay: Duration,
}

impl BulkSettings {
    pub fn from_config(config: &BulkConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            chunk_delay: config.chunk_delay(),
        }
    }
}

impl Default for BulkSettings {
    fn default() -> Self {
        Self {
            chunk_size: 8,
            chunk_delay: Duration::from_millis(50),
        }
    }
}

/// Joins monitored domains with their certificate and DNS data.
///
/// Domains are processed in fixed-size chunks: everything inside a chunk
/// runs concurrently, chunks run one after another with a short pause in
/// between. A domain whose certificate cannot be fetched comes back with
/// `status: error` and does not affect the others.
pub struct EnrichDomainsUseCase {
    fetcher: Arc<CertificateFetcher>,
    refresh_queue: Arc<DnsRefreshQueue>,
    list_cache: Arc<DomainListCache>,
    clock: Arc<dyn Clock>,
    settings: BulkSettings,
}

impl EnrichDomainsUseCase {
    pub fn new(
        fetcher: Arc<CertificateFetcher>,
        refresh_queue: Arc<DnsRefreshQueue>,
        list_cache: Arc<DomainListCache>,
        clock: Arc<dyn Clock>,
        settings: BulkSettings,
    ) -> Self {
        Self {
            fetcher,
            refresh_queue,
            list_cache,
            clock,
            settings,
        }
    }

    /// Enriches every monitored domain.
    #[instrument(skip(self))]
    pub async fn execute(&self, fast_mode: bool) -> Result<Vec<EnrichedDomain>, DomainError> {
        let domains = self.list_cache.get().await?;
        Ok(self.enrich_all(&domains, fast_mode).await)
    }

    /// Output order matches `domains`.
    pub async fn enrich_all(
        &self,
        domains: &[MonitoredDomain],
        fast_mode: bool,
    ) -> Vec<EnrichedDomain> {
        let mut enriched = Vec::with_capacity(domains.len());

        for (index, chunk) in domains.chunks(self.settings.chunk_size.max(1)).enumerate() {
            if index > 0 && !self.settings.chunk_delay.is_zero() {
                tokio::time::sleep(self.settings.chunk_delay).await;
            }

            let results = join_all(
                chunk
                    .iter()
                    .cloned()
                    .map(|record| self.enrich_one(record, fast_mode)),
            )
            .await;
            enriched.extend(results);
        }

        let failed = enriched.iter().filter(|d| !d.is_success()).count();
        debug!(
            total = enriched.len(),
            failed,
            fast_mode,
            "Bulk enrichment finished"
        );
        enriched
    }

    /// Enriches one record. In fast mode DNS comes from cache only and a
    /// miss is left to the background refresh.
    pub async fn enrich_one(&self, record: MonitoredDomain, fast_mode: bool) -> EnrichedDomain {
        let port = self.fetcher.default_port();

        let (certificate, dns) = if fast_mode {
            let certificate = self.fetcher.resolve_certificate(&record.domain, port).await;
            let dns = cached_or_enqueue(&self.fetcher, &self.refresh_queue, &record.domain);
            (certificate, dns)
        } else {
            let (certificate, dns) = tokio::join!(
                self.fetcher.resolve_certificate(&record.domain, port),
                self.fetcher.resolve_dns_info(&record.domain),
            );
            (certificate, Some(dns))
        };

        let checked_at = self.clock.now_rfc3339();
        match certificate {
            Ok(info) => EnrichedDomain::success(record, &info, dns, checked_at),
            Err(e) => {
                warn!(domain = %record.domain, error = %e, "Enrichment failed");
                EnrichedDomain::failure(record, dns, checked_at)
            }
        }
    }
}
