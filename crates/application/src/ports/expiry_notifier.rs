use async_trait::async_trait;
use certwatch_domain::{DomainError, ExpiryAlert};

#[async_trait]
pub trait ExpiryNotifier: Send + Sync {
    async fn notify(&self, alert: &ExpiryAlert) -> Result<(), DomainError>;
}
