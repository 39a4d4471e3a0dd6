use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::services::{CertificateFetcher, DnsRefreshQueue};

/// Marks a host complete however its lookup ends.
struct CompletionGuard<'a> {
    queue: &'a DnsRefreshQueue,
    host: String,
}

impl Drop for CompletionGuard<'_> {
    fn drop(&mut self) {
        self.queue.complete(&self.host);
    }
}

/// One step of the background DNS refresh: takes a batch off the queue and
/// resolves it concurrently. Nothing is retried.
pub struct DrainRefreshQueueUseCase {
    fetcher: Arc<CertificateFetcher>,
    queue: Arc<DnsRefreshQueue>,
}

impl DrainRefreshQueueUseCase {
    pub fn new(fetcher: Arc<CertificateFetcher>, queue: Arc<DnsRefreshQueue>) -> Self {
        Self { fetcher, queue }
    }

    /// Returns how many hosts were processed.
    #[instrument(skip(self))]
    pub async fn execute(&self, batch_size: usize) -> usize {
        let batch = self.queue.take_batch(batch_size);
        if batch.is_empty() {
            return 0;
        }

        let processed = batch.len();
        join_all(batch.into_iter().map(|host| async move {
            let guard = CompletionGuard {
                queue: &self.queue,
                host,
            };
            let info = self.fetcher.resolve_dns_info(&guard.host).await;
            debug!(
                domain = %guard.host,
                name_servers = info.name_servers.len(),
                addresses = info.addresses.len(),
                "DNS refreshed"
            );
        }))
        .await;

        debug!(
            processed,
            remaining = self.queue.depth(),
            "DNS refresh batch finished"
        );
        processed
    }
}
