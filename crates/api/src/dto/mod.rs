pub mod certificate;
pub mod domain;
pub mod health;

pub use certificate::{BulkQuery, CertificateInfoResponse, CertificateQuery};
pub use domain::{CreateDomainRequest, CreateDomainResponse, MessageResponse};
pub use health::{CacheSizes, FetcherCounters, HealthResponse};
