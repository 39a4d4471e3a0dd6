use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Capacities and TTLs of the metadata caches
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Successful certificate lookups kept in memory (default: 1000)
    #[serde(default = "default_certificate_capacity")]
    pub certificate_capacity: usize,

    /// Seconds a certificate lookup stays fresh (default: 3600)
    #[serde(default = "default_certificate_ttl")]
    pub certificate_ttl_secs: u64,

    /// Failed lookups remembered to avoid re-probing (default: 200)
    #[serde(default = "default_failure_capacity")]
    pub failure_capacity: usize,

    /// Seconds a failure is served without probing again (default: 60)
    #[serde(default = "default_failure_ttl")]
    pub failure_ttl_secs: u64,

    #[serde(default = "default_dns_capacity")]
    pub dns_capacity: usize,

    /// Seconds a DNS snapshot stays fresh (default: 300)
    #[serde(default = "default_dns_ttl")]
    pub dns_ttl_secs: u64,

    /// Seconds the monitored-domain list is served from memory (default: 30)
    #[serde(default = "default_domain_list_ttl")]
    pub domain_list_ttl_secs: u64,
}

impl CacheConfig {
    pub fn certificate_ttl(&self) -> Duration {
        Duration::from_secs(self.certificate_ttl_secs)
    }

    pub fn failure_ttl(&self) -> Duration {
        Duration::from_secs(self.failure_ttl_secs)
    }

    pub fn dns_ttl(&self) -> Duration {
        Duration::from_secs(self.dns_ttl_secs)
    }

    pub fn domain_list_ttl(&self) -> Duration {
        Duration::from_secs(self.domain_list_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            certificate_capacity: default_certificate_capacity(),
            certificate_ttl_secs: default_certificate_ttl(),
            failure_capacity: default_failure_capacity(),
            failure_ttl_secs: default_failure_ttl(),
            dns_capacity: default_dns_capacity(),
            dns_ttl_secs: default_dns_ttl(),
            domain_list_ttl_secs: default_domain_list_ttl(),
        }
    }
}

fn default_certificate_capacity() -> usize {
    1000
}

fn default_certificate_ttl() -> u64 {
    3600
}

fn default_failure_capacity() -> usize {
    200
}

fn default_failure_ttl() -> u64 {
    60
}

fn default_dns_capacity() -> usize {
    1000
}

fn default_dns_ttl() -> u64 {
    300
}

fn default_domain_list_ttl() -> u64 {
    30
}
