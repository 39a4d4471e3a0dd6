use async_trait::async_trait;
use certwatch_application::cache::DomainListCache;
use certwatch_application::ports::{
    CertificateProbe, Clock, DnsProbe, DomainRepository, ExpiryNotifier, ManualClock,
};
use certwatch_application::services::{
    CertificateFetcher, DnsRefreshQueue, FetcherCaches, FetcherSettings,
};
use certwatch_domain::config::CacheConfig;
use certwatch_domain::{
    CertificateFields, DistinguishedName, DomainError, ExpiryAlert, MonitoredDomain,
};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub const START_MILLIS: u64 = 1_735_689_600_000; // 2025-01-01T00:00:00Z

// ============================================================================
// Mock CertificateProbe
// ============================================================================

#[derive(Clone)]
pub struct MockCertificateProbe {
    not_after: Arc<RwLock<DateTime<Utc>>>,
    overrides: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
    failing: Arc<RwLock<HashSet<String>>>,
    delay: Arc<RwLock<Duration>>,
    calls: Arc<AtomicU64>,
    calls_by_host: Arc<RwLock<HashMap<String, u64>>>,
}

impl MockCertificateProbe {
    pub fn new() -> Self {
        Self {
            not_after: Arc::new(RwLock::new(unix((START_MILLIS / 1000) as i64 + 90 * 86_400))),
            overrides: Arc::new(RwLock::new(HashMap::new())),
            failing: Arc::new(RwLock::new(HashSet::new())),
            delay: Arc::new(RwLock::new(Duration::ZERO)),
            calls: Arc::new(AtomicU64::new(0)),
            calls_by_host: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn fail_host(&self, host: &str) {
        self.failing.write().await.insert(host.to_string());
    }

    pub async fn recover_host(&self, host: &str) {
        self.failing.write().await.remove(host);
    }

    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }

    pub async fn set_expiry(&self, host: &str, not_after_unix: i64) {
        self.overrides
            .write()
            .await
            .insert(host.to_string(), unix(not_after_unix));
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn calls_for(&self, host: &str) -> u64 {
        self.calls_by_host.read().await.get(host).copied().unwrap_or(0)
    }
}

impl Default for MockCertificateProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CertificateProbe for MockCertificateProbe {
    async fn probe(&self, host: &str, _port: u16) -> Result<CertificateFields, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .calls_by_host
            .write()
            .await
            .entry(host.to_string())
            .or_insert(0) += 1;

        let delay = *self.delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if self.failing.read().await.contains(host) {
            return Err(DomainError::ProbeFailed(format!(
                "connect to {host}: connection refused"
            )));
        }

        let not_after = self
            .overrides
            .read()
            .await
            .get(host)
            .copied()
            .unwrap_or(*self.not_after.read().await);

        Ok(certificate_for(host, not_after))
    }
}

pub fn unix(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
}

pub fn certificate_for(host: &str, not_after: DateTime<Utc>) -> CertificateFields {
    CertificateFields {
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
    }
}

// ============================================================================
// Mock DnsProbe
// ============================================================================

#[derive(Clone)]
pub struct MockDnsProbe {
    failing_ns: Arc<RwLock<bool>>,
    ns_delay: Arc<RwLock<Duration>>,
    calls: Arc<AtomicU64>,
}

impl MockDnsProbe {
    pub fn new() -> Self {
        Self {
            failing_ns: Arc::new(RwLock::new(false)),
            ns_delay: Arc::new(RwLock::new(Duration::ZERO)),
            calls: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn fail_name_servers(&self) {
        *self.failing_ns.write().await = true;
    }

    pub async fn set_ns_delay(&self, delay: Duration) {
        *self.ns_delay.write().await = delay;
    }

    /// Lookups started, counting the NS and address arms separately.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockDnsProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsProbe for MockDnsProbe {
    async fn name_servers(&self, host: &str) -> Result<Vec<String>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.ns_delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if *self.failing_ns.read().await {
            return Err(DomainError::ProbeFailed("SERVFAIL".to_string()));
        }
        Ok(vec![format!("ns1.{host}"), format!("ns2.{host}")])
    }

    async fn addresses(&self, _host: &str) -> Result<Vec<String>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec!["93.184.216.34".to_string()])
    }
}

// ============================================================================
// Mock DomainRepository
// ============================================================================

#[derive(Clone)]
pub struct MockDomainRepository {
    domains: Arc<RwLock<Vec<MonitoredDomain>>>,
    next_id: Arc<AtomicU64>,
    list_calls: Arc<AtomicU64>,
}

impl MockDomainRepository {
    pub fn new() -> Self {
        Self {
            domains: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            list_calls: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn with_domains(names: &[&str]) -> Self {
        let repo = Self::new();
        for name in names {
            repo.create(name).await.unwrap();
        }
        repo
    }

    pub fn list_calls(&self) -> u64 {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub async fn count(&self) -> usize {
        self.domains.read().await.len()
    }
}

impl Default for MockDomainRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainRepository for MockDomainRepository {
    async fn list(&self) -> Result<Vec<MonitoredDomain>, DomainError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
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
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
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

// ============================================================================
// Recording ExpiryNotifier
// ============================================================================

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    alerts: Arc<RwLock<Vec<ExpiryAlert>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn alerts(&self) -> Vec<ExpiryAlert> {
        self.alerts.read().await.clone()
    }
}

#[async_trait]
impl ExpiryNotifier for RecordingNotifier {
    async fn notify(&self, alert: &ExpiryAlert) -> Result<(), DomainError> {
        self.alerts.write().await.push(alert.clone());
        Ok(())
    }
}

// ============================================================================
// Wiring
// ============================================================================

pub struct Harness {
    pub clock: Arc<ManualClock>,
    pub certificate_probe: MockCertificateProbe,
    pub dns_probe: MockDnsProbe,
    pub repository: MockDomainRepository,
    pub fetcher: Arc<CertificateFetcher>,
    pub refresh_queue: Arc<DnsRefreshQueue>,
    pub list_cache: Arc<DomainListCache>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_repository(MockDomainRepository::new())
    }

    pub fn with_repository(repository: MockDomainRepository) -> Self {
        Self::build(repository, FetcherSettings::default(), &CacheConfig::default())
    }

    pub fn build(
        repository: MockDomainRepository,
        settings: FetcherSettings,
        cache_config: &CacheConfig,
    ) -> Self {
        let clock = Arc::new(ManualClock::new(START_MILLIS));
        let dyn_clock: Arc<dyn Clock> = clock.clone();
        let certificate_probe = MockCertificateProbe::new();
        let dns_probe = MockDnsProbe::new();

        let caches = Arc::new(FetcherCaches::new(cache_config, dyn_clock.clone()));
        let fetcher = Arc::new(CertificateFetcher::new(
            Arc::new(certificate_probe.clone()),
            Arc::new(dns_probe.clone()),
            caches,
            settings,
            dyn_clock.clone(),
        ));
        let refresh_queue = Arc::new(DnsRefreshQueue::new(dyn_clock.clone()));
        let list_cache = Arc::new(DomainListCache::new(
            Arc::new(repository.clone()),
            dyn_clock,
            Duration::from_secs(30),
        ));

        Self {
            clock,
            certificate_probe,
            dns_probe,
            repository,
            fetcher,
            refresh_queue,
            list_cache,
        }
    }

    pub fn dyn_clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }
}
