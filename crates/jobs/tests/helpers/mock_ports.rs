use async_trait::async_trait;
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
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Probes
// ============================================================================

#[derive(Clone, Default)]
pub struct MockCertificateProbe {
    expiries: Arc<RwLock<HashMap<String, i64>>>,
}

impl MockCertificateProbe {
    pub async fn set_expiry(&self, host: &str, not_after_unix: i64) {
        self.expiries
            .write()
            .await
            .insert(host.to_string(), not_after_unix);
    }
}

#[async_trait]
impl CertificateProbe for MockCertificateProbe {
    async fn probe(&self, host: &str, _port: u16) -> Result<CertificateFields, DomainError> {
        let not_after = self
            .expiries
            .read()
            .await
            .get(host)
            .copied()
            .ok_or_else(|| DomainError::ProbeFailed(format!("{host}: no route")))?;
        let not_after = DateTime::<Utc>::from_timestamp(not_after, 0).unwrap();

        Ok(CertificateFields {
            subject: DistinguishedName {
                common_name: Some(host.to_string()),
                ..Default::default()
            },
            issuer: DistinguishedName::default(),
            not_before: not_after - chrono::Duration::days(90),
            not_after,
            serial_number: "01".to_string(),
            fingerprint: "00".to_string(),
        })
    }
}

#[derive(Clone, Default)]
pub struct MockDnsProbe {
    calls: Arc<AtomicU64>,
}

impl MockDnsProbe {
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsProbe for MockDnsProbe {
    async fn name_servers(&self, host: &str) -> Result<Vec<String>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![format!("ns.{host}")])
    }

    async fn addresses(&self, _host: &str) -> Result<Vec<String>, DomainError> {
        Ok(vec!["192.0.2.1".to_string()])
    }
}

// ============================================================================
// Repository and notifier
// ============================================================================

#[derive(Clone, Default)]
pub struct MockDomainRepository {
    domains: Arc<RwLock<Vec<MonitoredDomain>>>,
}

impl MockDomainRepository {
    pub async fn with_domains(names: &[&str]) -> Self {
        let repo = Self::default();
        for name in names {
            repo.create(name).await.unwrap();
        }
        repo
    }
}

#[async_trait]
impl DomainRepository for MockDomainRepository {
    async fn list(&self) -> Result<Vec<MonitoredDomain>, DomainError> {
        let mut domains = self.domains.read().await.clone();
        domains.reverse();
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
        let record = MonitoredDomain::new(domains.len() as i64 + 1, domain, "2025-01-01 00:00:00");
        domains.push(record.clone());
        Ok(record)
    }

    async fn delete(&self, id: i64) -> Result<Option<MonitoredDomain>, DomainError> {
        let mut domains = self.domains.write().await;
        let position = domains.iter().position(|d| d.id == id);
        Ok(position.map(|index| domains.remove(index)))
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    alerts: Arc<RwLock<Vec<ExpiryAlert>>>,
}

impl RecordingNotifier {
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

pub fn build_fetcher(
    certificate_probe: &MockCertificateProbe,
    dns_probe: &MockDnsProbe,
    clock: Arc<dyn Clock>,
) -> Arc<CertificateFetcher> {
    let caches = Arc::new(FetcherCaches::new(&CacheConfig::default(), clock.clone()));
    Arc::new(CertificateFetcher::new(
        Arc::new(certificate_probe.clone()),
        Arc::new(dns_probe.clone()),
        caches,
        FetcherSettings::default(),
        clock,
    ))
}

pub fn manual_clock(unix_secs: i64) -> Arc<ManualClock> {
    Arc::new(ManualClock::new(unix_secs as u64 * 1000))
}

pub fn refresh_queue(clock: Arc<dyn Clock>) -> Arc<DnsRefreshQueue> {
    Arc::new(DnsRefreshQueue::new(clock))
}
