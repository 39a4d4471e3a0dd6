mod drain_refresh_queue;

pub use drain_refresh_queue::DrainRefreshQueueUseCase;

use certwatch_domain::DnsInfo;
use tracing::debug;

use crate::services::{CertificateFetcher, DnsRefreshQueue};

/// Cached DNS for `domain`, scheduling a background lookup on a miss.
pub(crate) fn cached_or_enqueue(
    fetcher: &CertificateFetcher,
    queue: &DnsRefreshQueue,
    domain: &str,
) -> Option<DnsInfo> {
    let cached = fetcher.cached_dns_info(domain);
    if cached.is_none() && queue.enqueue(domain) {
        debug!(domain = %domain, "DNS not cached, queued for refresh");
    }
    cached
}
