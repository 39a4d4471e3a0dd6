use certwatch_domain::{canonical_host, validate_domain, DomainError, EnrichedDomain};
use std::sync::Arc;
use tracing::{info, instrument};

use super::EnrichDomainsUseCase;
use crate::cache::DomainListCache;
use crate::ports::DomainRepository;

pub struct CreateDomainUseCase {
    repository: Arc<dyn DomainRepository>,
    list_cache: Arc<DomainListCache>,
    enricher: Arc<EnrichDomainsUseCase>,
}

impl CreateDomainUseCase {
    pub fn new(
        repository: Arc<dyn DomainRepository>,
        list_cache: Arc<DomainListCache>,
        enricher: Arc<EnrichDomainsUseCase>,
    ) -> Self {
        Self {
            repository,
            list_cache,
            enricher,
        }
    }

    /// Starts monitoring `domain` and returns it with fresh certificate data.
    ///
    /// # Errors
    ///
    /// * `DomainError::InvalidDomainName` - If the name fails validation
    /// * `DomainError::DomainAlreadyExists` - If the domain is already monitored
    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Result<EnrichedDomain, DomainError> {
        validate_domain(domain)?;
        let host = canonical_host(domain);

        if self.repository.find_by_name(&host).await?.is_some() {
            return Err(DomainError::DomainAlreadyExists(host));
        }

        let record = self.repository.create(&host).await?;
        self.list_cache.invalidate();

        info!(id = record.id, domain = %record.domain, "Domain added");

        Ok(self.enricher.enrich_one(record, false).await)
    }
}
