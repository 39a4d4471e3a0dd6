use async_trait::async_trait;
use axum::Router;
use certwatch_api::{create_api_routes, AppState};
use certwatch_application::cache::DomainListCache;
use certwatch_application::ports::{
    CertificateProbe, Clock, DnsProbe, DomainRepository, ManualClock,
};
use certwatch_application::services::{
    CertificateFetcher, DnsRefreshQueue, FetcherCaches, FetcherSettings,
};
use certwatch_application::use_cases::{
    BulkSettings, CreateDomainUseCase, DeleteDomainUseCase, EnrichDomainsUseCase,
    GetCacheStatsUseCase, GetCertificateUseCase, GetDomainUseCase, ListDomainsUseCase,
};
use certwatch_domain::config::CacheConfig;
use certwatch_domain::{CertificateFields, DistinguishedName, DomainError, MonitoredDomain};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub const START_MILLIS: u64 = 1_735_689_600_000; // 2025-01-01T00:00:00Z
pub const NOT_AFTER_UNIX: i64 = 1_735_689_600 + 90 * 86_400;

#[derive(Clone, Default)]
pub struct MockCertificateProbe {
    failing: Arc<RwLock<HashSet<String>>>,
    calls: Arc<AtomicU64>,
}

impl MockCertificateProbe {
    pub async fn fail_host(&self, host: &str) {
        self.failing.write().await.insert(host.to_string());
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CertificateProbe for MockCertificateProbe {
    async fn probe(&self, host: &str, _port: u16) -> Result<CertificateFields, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.read().await.contains(host) {
            return Err(DomainError::ProbeFailed(format!(
                "connect to {host}: connection refused"
            )));
        }

        let not_after = DateTime::<Utc>::from_timestamp(NOT_AFTER_UNIX, 0).unwrap();
        Ok(CertificateFields {
            subject: DistinguishedName {
                common_name: Some(host.to_string()),
                organization: None,
                organizational_unit: None,
            },
            issuer: DistinguishedName {
                common_name: Some("R11".to_string()),
                organization: Some("Let's Encrypt".to_string()),
                organizational_unit: None,
            },
            not_before: not_after - chrono::Duration::days(90),
            not_after,
            serial_number: "03F1A2B4".to_string(),
            fingerprint: "AB:CD:EF".to_string(),
        })
    }
}

#[derive(Clone, Default)]
pub struct MockDnsProbe;

#[async_trait]
impl DnsProbe for MockDnsProbe {
    async fn name_servers(&self, host: &str) -> Result<Vec<String>, DomainError> {
        Ok(vec![format!("ns1.{host}")])
    }

    async fn addresses(&self, _host: &str) -> Result<Vec<String>, DomainError> {
        Ok(vec!["93.184.216.34".to_string()])
    }
}

#[derive(Clone, Default)]
pub struct InMemoryDomainRepository {
    domains: Arc<RwLock<Vec<MonitoredDomain>>>,
    next_id: Arc<AtomicU64>,
}

#[async_trait]
impl DomainRepository for InMemoryDomainRepository {
    async fn list(&self) -> Result<Vec<MonitoredDomain>, DomainError> {
        let mut domains = self.domains.read().await.clone();
        domains.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(domains)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<MonitoredDomain>, DomainError> {
        Ok(self.domains.read().await.iter().find(|d| d.id == id).cloned())
    }

    async fn find_by_name(&self, domain: &str) -> Result<Option<MonitoredDomain>, DomainError> {
        Ok(self
            .domains
            .read()
            .await
            .iter()
            .find(|d| d.domain == domain)
            .cloned())
    }

    async fn create(&self, domain: &str) -> Result<MonitoredDomain, DomainError> {
        let mut domains = self.domains.write().await;
        if domains.iter().any(|d| d.domain == domain) {
            return Err(DomainError::DomainAlreadyExists(domain.to_string()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let record = MonitoredDomain::new(id, domain, "2025-01-01 00:00:00");
        domains.push(record.clone());
        Ok(record)
    }

    async fn delete(&self, id: i64) -> Result<Option<MonitoredDomain>, DomainError> {
        let mut domains = self.domains.write().await;
        let position = domains.iter().position(|d| d.id == id);
        Ok(position.map(|index| domains.remove(index)))
    }
}

pub struct TestApp {
    pub router: Router,
    pub certificate_probe: MockCertificateProbe,
    pub repository: InMemoryDomainRepository,
    pub refresh_queue: Arc<DnsRefreshQueue>,
}

pub fn build_app() -> TestApp {
    let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(START_MILLIS));
    let certificate_probe = MockCertificateProbe::default();
    let repository = InMemoryDomainRepository::default();
    let repo: Arc<dyn DomainRepository> = Arc::new(repository.clone());

    let caches = Arc::new(FetcherCaches::new(&CacheConfig::default(), clock.clone()));
    let fetcher = Arc::new(CertificateFetcher::new(
        Arc::new(certificate_probe.clone()),
        Arc::new(MockDnsProbe),
        caches,
        FetcherSettings::default(),
        clock.clone(),
    ));
    let refresh_queue = Arc::new(DnsRefreshQueue::new(clock.clone()));
    let list_cache = Arc::new(DomainListCache::new(
        repo.clone(),
        clock.clone(),
        Duration::from_secs(30),
    ));

    let enrich_domains = Arc::new(EnrichDomainsUseCase::new(
        fetcher.clone(),
        refresh_queue.clone(),
        list_cache.clone(),
        clock.clone(),
        BulkSettings::default(),
    ));

    let state = AppState {
        get_certificate: Arc::new(GetCertificateUseCase::new(
            fetcher.clone(),
            refresh_queue.clone(),
        )),
        enrich_domains: enrich_domains.clone(),
        list_domains: Arc::new(ListDomainsUseCase::new(list_cache.clone())),
        create_domain: Arc::new(CreateDomainUseCase::new(
            repo.clone(),
            list_cache.clone(),
            enrich_domains.clone(),
        )),
        get_domain: Arc::new(GetDomainUseCase::new(repo.clone(), enrich_domains)),
        delete_domain: Arc::new(DeleteDomainUseCase::new(
            repo,
            list_cache.clone(),
            fetcher.clone(),
        )),
        get_stats: Arc::new(GetCacheStatsUseCase::new(
            fetcher,
            refresh_queue.clone(),
            list_cache,
            clock,
        )),
    };

    TestApp {
        router: create_api_routes(state),
        certificate_probe,
        repository,
        refresh_queue,
    }
}
