use async_trait::async_trait;
use certwatch_application::ports::ExpiryNotifier;
use certwatch_domain::{DomainError, ExpiryAlert};
use tracing::warn;

/// Writes expiry alerts to the service log.
#[derive(Debug, Default)]
pub struct LogExpiryNotifier;

impl LogExpiryNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExpiryNotifier for LogExpiryNotifier {
    async fn notify(&self, alert: &ExpiryAlert) -> Result<(), DomainError> {
        warn!(
            threshold = %alert.threshold,
            priority = alert.threshold.priority(),
            count = alert.domains.len(),
            "SSL certificates expiring soon"
        );

        for domain in &alert.domains {
            warn!(
                domain = %domain.domain,
                expires_on = %domain.expires_on,
                days_left = domain.days_left,
                hours_left = domain.hours_left,
                priority = alert.threshold.priority(),
                "Certificate expiring"
            );
        }

        Ok(())
    }
}
