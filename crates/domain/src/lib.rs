//! certwatch domain layer
pub mod certificate;
pub mod config;
pub mod dns_info;
pub mod errors;
pub mod expiry;
pub mod monitored_domain;
pub mod validators;

pub use certificate::{CertificateFields, CertificateInfo, CertificateParty, DistinguishedName};
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_info::DnsInfo;
pub use errors::DomainError;
pub use expiry::{ExpiringDomain, ExpiryAlert, ExpiryThreshold, TimeLeft};
pub use monitored_domain::{
    CertificateSummary, EnrichedDomain, EnrichmentStatus, MonitoredDomain,
};
pub use validators::{canonical_host, certificate_cache_key, validate_domain};
