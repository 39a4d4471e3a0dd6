pub mod cache;
pub mod certificates;
pub mod dns;
pub mod domains;
pub mod expiry;

pub use cache::{GetCacheStatsUseCase, HealthSnapshot, PrewarmCacheUseCase, PrewarmSummary};
pub use certificates::{CertificateReport, GetCertificateUseCase};
pub use dns::DrainRefreshQueueUseCase;
pub use domains::{
    BulkSettings, CreateDomainUseCase, DeleteDomainUseCase, EnrichDomainsUseCase,
    GetDomainUseCase, ListDomainsUseCase,
};
pub use expiry::CheckExpiryUseCase;
