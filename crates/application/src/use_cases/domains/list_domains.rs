use certwatch_domain::{DomainError, MonitoredDomain};
use std::sync::Arc;

use crate::cache::DomainListCache;

pub struct ListDomainsUseCase {
    list_cache: Arc<DomainListCache>,
}

impl ListDomainsUseCase {
    pub fn new(list_cache: Arc<DomainListCache>) -> Self {
        Self { list_cache }
    }

    pub async fn execute(&self) -> Result<Arc<Vec<MonitoredDomain>>, DomainError> {
        self.list_cache.get().await
    }
}
