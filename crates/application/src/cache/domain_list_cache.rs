use certwatch_domain::{DomainError, MonitoredDomain};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

use crate::ports::{Clock, DomainRepository};

struct Slot {
    domains: Option<(Arc<Vec<MonitoredDomain>>, u64)>,
    generation: u64,
}

/// Short-lived snapshot of the monitored-domain list.
///
/// Every invalidation bumps a generation counter. A load started before an
/// invalidation does not write its result back, so a create or delete is
/// never hidden behind a list read that raced with it.
pub struct DomainListCache {
    repository: Arc<dyn DomainRepository>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    slot: Mutex<Slot>,
}

impl DomainListCache {
    pub fn new(repository: Arc<dyn DomainRepository>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            repository,
            clock,
            ttl,
            slot: Mutex::new(Slot {
                domains: None,
                generation: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn get(&self) -> Result<Arc<Vec<MonitoredDomain>>, DomainError> {
        let now = self.clock.now_millis();
        let generation = {
            let slot = self.lock();
            if let Some((domains, loaded_at)) = &slot.domains {
                if now.saturating_sub(*loaded_at) <= self.ttl.as_millis() as u64 {
                    return Ok(Arc::clone(domains));
                }
            }
            slot.generation
        };

        let domains = Arc::new(self.repository.list().await?);

        let mut slot = self.lock();
        if slot.generation == generation {
            slot.domains = Some((Arc::clone(&domains), self.clock.now_millis()));
        } else {
            debug!("Domain list changed during load, not caching snapshot");
        }
        Ok(domains)
    }

    pub fn invalidate(&self) {
        let mut slot = self.lock();
        slot.domains = None;
        slot.generation += 1;
    }

    pub fn is_cached(&self) -> bool {
        self.lock().domains.is_some()
    }
}
