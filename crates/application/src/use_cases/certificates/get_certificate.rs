use certwatch_domain::{validate_domain, CertificateInfo, DnsInfo, DomainError};
use std::sync::Arc;
use tracing::instrument;

use crate::services::{CertificateFetcher, DnsRefreshQueue};
use crate::use_cases::dns::cached_or_enqueue;

/// Certificate lookup result with derived Unix timestamps.
///
/// `dns` is `None` while the host waits for its background refresh.
#[derive(Debug, Clone)]
pub struct CertificateReport {
    pub certificate: Arc<CertificateInfo>,
    pub expiration_date_unix: Option<i64>,
    pub issued_date_unix: Option<i64>,
    pub dns: Option<DnsInfo>,
}

pub struct GetCertificateUseCase {
    fetcher: Arc<CertificateFetcher>,
    refresh_queue: Arc<DnsRefreshQueue>,
}

impl GetCertificateUseCase {
    pub fn new(fetcher: Arc<CertificateFetcher>, refresh_queue: Arc<DnsRefreshQueue>) -> Self {
        Self {
            fetcher,
            refresh_queue,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Result<CertificateReport, DomainError> {
        validate_domain(domain)?;

        let certificate = self
            .fetcher
            .resolve_certificate(domain, self.fetcher.default_port())
            .await?;
        let dns = cached_or_enqueue(&self.fetcher, &self.refresh_queue, domain);

        Ok(CertificateReport {
            expiration_date_unix: certificate.expiration_unix(),
            issued_date_unix: certificate.issued_unix(),
            certificate,
            dns,
        })
    }
}
