use certwatch_domain::{DomainError, MonitoredDomain};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::cache::DomainListCache;
use crate::ports::DomainRepository;
use crate::services::CertificateFetcher;

pub struct DeleteDomainUseCase {
    repository: Arc<dyn DomainRepository>,
    list_cache: Arc<DomainListCache>,
    fetcher: Arc<CertificateFetcher>,
}

impl DeleteDomainUseCase {
    pub fn new(
        repository: Arc<dyn DomainRepository>,
        list_cache: Arc<DomainListCache>,
        fetcher: Arc<CertificateFetcher>,
    ) -> Self {
        Self {
            repository,
            list_cache,
            fetcher,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, id: i64) -> Result<MonitoredDomain, DomainError> {
        let deleted = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("domain with id {id}")))?;

        self.list_cache.invalidate();
        self.fetcher.invalidate(&deleted.domain);

        info!(id, domain = %deleted.domain, "Domain removed");
        Ok(deleted)
    }
}
