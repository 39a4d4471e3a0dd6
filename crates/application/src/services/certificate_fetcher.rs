use certwatch_domain::config::CacheConfig;
use certwatch_domain::{
    canonical_host, certificate_cache_key, CertificateInfo, Config, ConfigError, DnsInfo,
    DomainError,
};
use chrono_tz::Tz;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{debug, info, instrument, warn};

use crate::cache::TtlCache;
use crate::ports::{CertificateProbe, Clock, DnsProbe};

/// Reason a certificate lookup failed, remembered for the failure TTL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub reason: String,
    pub failed_at: u64,
}

/// The three metadata caches behind [`CertificateFetcher`].
pub struct FetcherCaches {
    pub certificates: TtlCache<Arc<CertificateInfo>>,
    pub failures: TtlCache<FailureRecord>,
    pub dns: TtlCache<DnsInfo>,
}

impl FetcherCaches {
    pub fn new(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            certificates: TtlCache::new(config.certificate_capacity, clock.clone())
                .with_eviction_listener(Box::new(|key, _| {
                    debug!(key = %key, "Certificate cache evicted entry");
                })),
            failures: TtlCache::new(config.failure_capacity, clock.clone()),
            dns: TtlCache::new(config.dns_capacity, clock),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetcherSettings {
    pub certificate_ttl: Duration,
    pub failure_ttl: Duration,
    pub dns_ttl: Duration,
    pub probe_timeout: Duration,
    pub dns_lookup_timeout: Duration,
    pub dns_total_timeout: Duration,
    pub default_port: u16,
    pub timezone: Tz,
}

impl FetcherSettings {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            certificate_ttl: config.cache.certificate_ttl(),
            failure_ttl: config.cache.failure_ttl(),
            dns_ttl: config.cache.dns_ttl(),
            probe_timeout: config.probe.tls_timeout(),
            dns_lookup_timeout: config.probe.dns_lookup_timeout(),
            dns_total_timeout: config.probe.dns_total_timeout(),
            default_port: config.probe.default_port,
            timezone: config.display_timezone()?,
        })
    }
}

impl Default for FetcherSettings {
    fn default() -> Self {
        Self {
            certificate_ttl: Duration::from_secs(3600),
            failure_ttl: Duration::from_secs(60),
            dns_ttl: Duration::from_secs(300),
            probe_timeout: Duration::from_millis(6000),
            dns_lookup_timeout: Duration::from_millis(1500),
            dns_total_timeout: Duration::from_millis(2000),
            default_port: 443,
            timezone: chrono_tz::Asia::Kolkata,
        }
    }
}

type GateMap = DashMap<String, Arc<AsyncMutex<()>>, FxBuildHasher>;

#[derive(Default)]
struct FetcherMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    probes: AtomicU64,
    probe_failures: AtomicU64,
    failures_served: AtomicU64,
    single_flight_joins: AtomicU64,
    dns_lookups: AtomicU64,
}

/// Point-in-time view of cache occupancy and lookup counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetcherStats {
    pub certificate_entries: usize,
    pub certificate_capacity: usize,
    pub failure_entries: usize,
    pub failure_capacity: usize,
    pub dns_entries: usize,
    pub dns_capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub probes: u64,
    pub probe_failures: u64,
    pub failures_served: u64,
    pub single_flight_joins: u64,
    pub dns_lookups: u64,
    /// Certificate keys with a probe gate currently open.
    pub in_flight_probes: usize,
}

/// Cache-first access to certificate and DNS metadata.
///
/// Certificate lookups go success cache, then failure cache, then a
/// timeout-bounded probe whose outcome is memoized either way. Concurrent
/// lookups of the same cold key share a single probe.
pub struct CertificateFetcher {
    certificate_probe: Arc<dyn CertificateProbe>,
    dns_probe: Arc<dyn DnsProbe>,
    caches: Arc<FetcherCaches>,
    settings: FetcherSettings,
    clock: Arc<dyn Clock>,
    in_flight: Arc<GateMap>,
    metrics: Arc<FetcherMetrics>,
}

impl CertificateFetcher {
    pub fn new(
        certificate_probe: Arc<dyn CertificateProbe>,
        dns_probe: Arc<dyn DnsProbe>,
        caches: Arc<FetcherCaches>,
        settings: FetcherSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            certificate_probe,
            dns_probe,
            caches,
            settings,
            clock,
            in_flight: Arc::new(DashMap::with_hasher(FxBuildHasher)),
            metrics: Arc::new(FetcherMetrics::default()),
        }
    }

    pub fn default_port(&self) -> u16 {
        self.settings.default_port
    }

    fn cached_outcome(&self, key: &str) -> Option<Result<Arc<CertificateInfo>, DomainError>> {
        if let Some(info) = self.caches.certificates.get(key, self.settings.certificate_ttl) {
            self.metrics.hits.fetch_add(1, Ordering::Relaxed);
            return Some(Ok(info));
        }

        if let Some(failure) = self.caches.failures.get(key, self.settings.failure_ttl) {
            self.metrics.failures_served.fetch_add(1, Ordering::Relaxed);
            return Some(Err(DomainError::ProbeFailed(failure.reason)));
        }

        None
    }

    /// Certificate metadata for `domain:port`.
    ///
    /// # Errors
    ///
    /// * `DomainError::ProbeFailed` - The probe failed or timed out now, or
    ///   did so within the failure TTL
    #[instrument(skip(self))]
    pub async fn resolve_certificate(
        &self,
        domain: &str,
        port: u16,
    ) -> Result<Arc<CertificateInfo>, DomainError> {
        let host = canonical_host(domain);
        let key = certificate_cache_key(&host, port);

        if let Some(outcome) = self.cached_outcome(&key) {
            return outcome;
        }

        let gate = self
            .in_flight
            .entry(key.clone())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone();

        let permit = match Arc::clone(&gate).try_lock_owned() {
            Ok(permit) => permit,
            Err(_) => {
                self.metrics.single_flight_joins.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "Joining in-flight certificate probe");
                Arc::clone(&gate).lock_owned().await
            }
        };

        let outcome = match self.cached_outcome(&key) {
            Some(outcome) => {
                drop(permit);
                outcome
            }
            None => self.spawn_probe(host, port, key.clone(), permit, &gate).await,
        };

        release_gate(&self.in_flight, &key, &gate);
        outcome
    }

    /// Runs the timed probe on its own task, which holds the gate until the
    /// outcome is memoized. Dropping the caller does not cancel it.
    async fn spawn_probe(
        &self,
        host: String,
        port: u16,
        key: String,
        permit: OwnedMutexGuard<()>,
        gate: &Arc<AsyncMutex<()>>,
    ) -> Result<Arc<CertificateInfo>, DomainError> {
        let task = self.probe_task();
        let in_flight = Arc::clone(&self.in_flight);
        let gate = Arc::clone(gate);

        let handle = tokio::spawn(async move {
            let outcome = task.run(&host, port, &key).await;
            drop(permit);
            release_gate(&in_flight, &key, &gate);
            outcome
        });

        match handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(DomainError::ProbeFailed(format!(
                "certificate probe task failed: {e}"
            ))),
        }
    }

    fn probe_task(&self) -> ProbeTask {
        ProbeTask {
            certificate_probe: Arc::clone(&self.certificate_probe),
            caches: Arc::clone(&self.caches),
            metrics: Arc::clone(&self.metrics),
            clock: Arc::clone(&self.clock),
            probe_timeout: self.settings.probe_timeout,
            timezone: self.settings.timezone,
        }
    }

    /// Nameservers and addresses of `domain`, from cache or a fresh lookup.
    ///
    /// Never fails: an arm that errors or misses the deadline contributes an
    /// empty list, and whatever was learned is cached.
    #[instrument(skip(self))]
    pub async fn resolve_dns_info(&self, domain: &str) -> DnsInfo {
        let host = canonical_host(domain);
        if let Some(info) = self.caches.dns.get(&host, self.settings.dns_ttl) {
            return info;
        }

        let info = self.lookup_dns(&host).await;
        self.caches.dns.set(&host, info.clone());
        info
    }

    async fn lookup_dns(&self, host: &str) -> DnsInfo {
        self.metrics.dns_lookups.fetch_add(1, Ordering::Relaxed);

        // Both arms start together, so the shared total only binds when it
        // is shorter than the per-lookup timeout.
        let now = Instant::now();
        let deadline =
            (now + self.settings.dns_lookup_timeout).min(now + self.settings.dns_total_timeout);

        let (name_servers, addresses) = tokio::join!(
            timeout_at(deadline, self.dns_probe.name_servers(host)),
            timeout_at(deadline, self.dns_probe.addresses(host)),
        );

        DnsInfo::new(
            settle_arm(host, "NS", name_servers),
            settle_arm(host, "A/AAAA", addresses),
            self.clock.now_millis(),
        )
    }

    /// Cached DNS snapshot only; never starts a lookup.
    pub fn cached_dns_info(&self, domain: &str) -> Option<DnsInfo> {
        self.caches.dns.get(&canonical_host(domain), self.settings.dns_ttl)
    }

    /// Drops every cached fact about `domain` on the default port.
    pub fn invalidate(&self, domain: &str) {
        let host = canonical_host(domain);
        let key = certificate_cache_key(&host, self.settings.default_port);
        self.caches.certificates.delete(&key);
        self.caches.failures.delete(&key);
        self.caches.dns.delete(&host);
        debug!(domain = %host, "Invalidated cached metadata");
    }

    pub fn clear(&self) {
        self.caches.certificates.clear();
        self.caches.failures.clear();
        self.caches.dns.clear();
    }

    pub fn stats(&self) -> FetcherStats {
        FetcherStats {
            certificate_entries: self.caches.certificates.len(),
            certificate_capacity: self.caches.certificates.capacity(),
            failure_entries: self.caches.failures.len(),
            failure_capacity: self.caches.failures.capacity(),
            dns_entries: self.caches.dns.len(),
            dns_capacity: self.caches.dns.capacity(),
            hits: self.metrics.hits.load(Ordering::Relaxed),
            misses: self.metrics.misses.load(Ordering::Relaxed),
            probes: self.metrics.probes.load(Ordering::Relaxed),
            probe_failures: self.metrics.probe_failures.load(Ordering::Relaxed),
            failures_served: self.metrics.failures_served.load(Ordering::Relaxed),
            single_flight_joins: self.metrics.single_flight_joins.load(Ordering::Relaxed),
            dns_lookups: self.metrics.dns_lookups.load(Ordering::Relaxed),
            in_flight_probes: self.in_flight.len(),
        }
    }
}

/// What a detached probe needs to record its outcome.
struct ProbeTask {
    certificate_probe: Arc<dyn CertificateProbe>,
    caches: Arc<FetcherCaches>,
    metrics: Arc<FetcherMetrics>,
    clock: Arc<dyn Clock>,
    probe_timeout: Duration,
    timezone: Tz,
}

impl ProbeTask {
    async fn run(
        &self,
        host: &str,
        port: u16,
        key: &str,
    ) -> Result<Arc<CertificateInfo>, DomainError> {
        self.metrics.misses.fetch_add(1, Ordering::Relaxed);
        self.metrics.probes.fetch_add(1, Ordering::Relaxed);

        let started = Instant::now();
        let result = timeout(self.probe_timeout, self.certificate_probe.probe(host, port)).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let reason = match result {
            Ok(Ok(fields)) => {
                let info = Arc::new(CertificateInfo::from_fields(
                    host,
                    fields,
                    self.timezone,
                    elapsed_ms,
                ));
                self.caches.certificates.set(key, Arc::clone(&info));
                self.caches.failures.delete(key);
                info!(domain = %host, port, fetch_time_ms = elapsed_ms, "Certificate fetched");
                return Ok(info);
            }
            Ok(Err(e)) => e.to_string(),
            Err(_) => format!(
                "TLS connection to {}:{} timed out after {}ms",
                host,
                port,
                self.probe_timeout.as_millis()
            ),
        };

        self.metrics.probe_failures.fetch_add(1, Ordering::Relaxed);
        warn!(domain = %host, port, error = %reason, "Certificate probe failed");
        self.caches.failures.set(
            key,
            FailureRecord {
                reason: reason.clone(),
                failed_at: self.clock.now_millis(),
            },
        );

        Err(DomainError::ProbeFailed(reason))
    }
}

/// Drops the gate for `key` once only the map and `gate` still reference it.
fn release_gate(in_flight: &GateMap, key: &str, gate: &Arc<AsyncMutex<()>>) {
    in_flight.remove_if(key, |_, current| {
        Arc::ptr_eq(current, gate) && Arc::strong_count(current) <= 2
    });
}

fn settle_arm<E: std::fmt::Display>(
    host: &str,
    record: &str,
    arm: Result<Result<Vec<String>, E>, tokio::time::error::Elapsed>,
) -> Vec<String> {
    match arm {
        Ok(Ok(values)) => values,
        Ok(Err(e)) => {
            debug!(domain = %host, record, error = %e, "DNS lookup failed");
            Vec::new()
        }
        Err(_) => {
            debug!(domain = %host, record, "DNS lookup timed out");
            Vec::new()
        }
    }
}
