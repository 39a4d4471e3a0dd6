use certwatch_domain::{DomainError, EnrichedDomain};
use std::sync::Arc;

use super::EnrichDomainsUseCase;
use crate::ports::DomainRepository;

pub struct GetDomainUseCase {
    repository: Arc<dyn DomainRepository>,
    enricher: Arc<EnrichDomainsUseCase>,
}

impl GetDomainUseCase {
    pub fn new(repository: Arc<dyn DomainRepository>, enricher: Arc<EnrichDomainsUseCase>) -> Self {
        Self {
            repository,
            enricher,
        }
    }

    pub async fn execute(&self, id: i64) -> Result<EnrichedDomain, DomainError> {
        let record = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("domain with id {id}")))?;

        Ok(self.enricher.enrich_one(record, false).await)
    }
}
