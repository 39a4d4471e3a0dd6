use async_trait::async_trait;
use certwatch_domain::DomainError;

/// Record lookups used to enrich a monitored domain.
///
/// Each lookup is independent; callers treat an error the same as an empty
/// answer.
#[async_trait]
pub trait DnsProbe: Send + Sync {
    /// NS records for `host`.
    async fn name_servers(&self, host: &str) -> Result<Vec<String>, DomainError>;

    /// A and AAAA records for `host`, rendered as strings.
    async fn addresses(&self, host: &str) -> Result<Vec<String>, DomainError>;
}
