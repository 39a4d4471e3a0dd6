use async_trait::async_trait;
use certwatch_domain::{CertificateFields, DomainError};

/// Opens a TLS session to `host:port` and reads the leaf certificate.
///
/// Implementations do not apply their own deadline; the caller wraps the
/// call in a timeout and drops the future when it expires.
#[async_trait]
pub trait CertificateProbe: Send + Sync {
    async fn probe(&self, host: &str, port: u16) -> Result<CertificateFields, DomainError>;
}
