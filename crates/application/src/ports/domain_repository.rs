use async_trait::async_trait;
use certwatch_domain::{DomainError, MonitoredDomain};

/// Persistence for the monitored-domain list.
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// All monitored domains, newest first.
    async fn list(&self) -> Result<Vec<MonitoredDomain>, DomainError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<MonitoredDomain>, DomainError>;

    async fn find_by_name(&self, domain: &str) -> Result<Option<MonitoredDomain>, DomainError>;

    /// Stores a new domain.
    ///
    /// # Errors
    ///
    /// * `DomainError::DomainAlreadyExists` - If the domain is already monitored
    /// * `DomainError::DatabaseError` - If a database error occurs
    async fn create(&self, domain: &str) -> Result<MonitoredDomain, DomainError>;

    /// Removes a domain and returns the deleted record, `None` if the id was
    /// unknown.
    async fn delete(&self, id: i64) -> Result<Option<MonitoredDomain>, DomainError>;
}
