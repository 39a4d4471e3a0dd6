use certwatch_domain::{DomainError, ExpiringDomain, ExpiryAlert, ExpiryThreshold, TimeLeft};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::ports::{Clock, DomainRepository, ExpiryNotifier};
use crate::services::CertificateFetcher;

/// Finds monitored domains whose certificate falls inside an alert window
/// and hands them to the notifier.
pub struct CheckExpiryUseCase {
    repository: Arc<dyn DomainRepository>,
    fetcher: Arc<CertificateFetcher>,
    notifier: Arc<dyn ExpiryNotifier>,
    clock: Arc<dyn Clock>,
}

impl CheckExpiryUseCase {
    pub fn new(
        repository: Arc<dyn DomainRepository>,
        fetcher: Arc<CertificateFetcher>,
        notifier: Arc<dyn ExpiryNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            fetcher,
            notifier,
            clock,
        }
    }

    /// Returns the alert that was sent, `None` when nothing matched.
    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        threshold: ExpiryThreshold,
    ) -> Result<Option<ExpiryAlert>, DomainError> {
        let domains = self.repository.list().await?;
        let port = self.fetcher.default_port();
        let mut expiring = Vec::new();

        for record in &domains {
            let info = match self.fetcher.resolve_certificate(&record.domain, port).await {
                Ok(info) => info,
                Err(e) => {
                    warn!(domain = %record.domain, error = %e, "Skipping domain in expiry check");
                    continue;
                }
            };

            let Some(expires_unix) = info.expiration_unix() else {
                warn!(domain = %record.domain, expires_on = %info.expires_on, "Unparseable expiry date");
                continue;
            };

            let left = TimeLeft::between(self.clock.now_unix(), expires_unix);
            if threshold.matches(left) {
                expiring.push(ExpiringDomain {
                    domain: record.domain.clone(),
                    expires_on: info.expires_on.clone(),
                    days_left: left.days,
                    hours_left: left.hours,
                });
            }
        }

        if expiring.is_empty() {
            debug!(threshold = %threshold, checked = domains.len(), "No certificates in window");
            return Ok(None);
        }

        let alert = ExpiryAlert {
            threshold,
            domains: expiring,
        };
        self.notifier.notify(&alert).await?;

        info!(
            threshold = %threshold,
            priority = threshold.priority(),
            count = alert.domains.len(),
            "Expiry alert sent"
        );
        Ok(Some(alert))
    }
}
