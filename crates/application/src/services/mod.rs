mod certificate_fetcher;
mod refresh_queue;

pub use certificate_fetcher::{
    CertificateFetcher, FailureRecord, FetcherCaches, FetcherSettings, FetcherStats,
};
pub use refresh_queue::{DnsRefreshQueue, QueueState};
