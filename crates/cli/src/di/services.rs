use certwatch_application::cache::DomainListCache;
use certwatch_application::ports::{Clock, SystemClock};
use certwatch_application::services::{
    CertificateFetcher, DnsRefreshQueue, FetcherCaches, FetcherSettings,
};
use certwatch_domain::Config;
use certwatch_infrastructure::probes::{HickoryDnsProbe, TlsCertificateProbe};
use std::sync::Arc;
use tracing::info;

use super::Repositories;

/// Process-wide caches and the orchestrator that fronts them.
pub struct Services {
    pub clock: Arc<dyn Clock>,
    pub fetcher: Arc<CertificateFetcher>,
    pub refresh_queue: Arc<DnsRefreshQueue>,
    pub list_cache: Arc<DomainListCache>,
}

impl Services {
    pub fn new(config: &Config, repos: &Repositories) -> anyhow::Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let certificate_probe = Arc::new(TlsCertificateProbe::new()?);
        let dns_probe = Arc::new(HickoryDnsProbe::new(config.probe.dns_lookup_timeout()));

        let caches = Arc::new(FetcherCaches::new(&config.cache, clock.clone()));
        let settings = FetcherSettings::from_config(config)?;

        let fetcher = Arc::new(CertificateFetcher::new(
            certificate_probe,
            dns_probe,
            caches,
            settings,
            clock.clone(),
        ));

        let refresh_queue = Arc::new(DnsRefreshQueue::new(clock.clone()));
        let list_cache = Arc::new(DomainListCache::new(
            repos.domains.clone(),
            clock.clone(),
            config.cache.domain_list_ttl(),
        ));

        info!(
            certificate_capacity = config.cache.certificate_capacity,
            failure_capacity = config.cache.failure_capacity,
            dns_capacity = config.cache.dns_capacity,
            "Caches initialized"
        );

        Ok(Self {
            clock,
            fetcher,
            refresh_queue,
            list_cache,
        })
    }

    /// Drops every cached entry and pending refresh.
    pub fn clear(&self) {
        self.fetcher.clear();
        self.refresh_queue.clear();
        self.list_cache.invalidate();
    }
}
