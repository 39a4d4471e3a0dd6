use async_trait::async_trait;
use certwatch_application::ports::CertificateProbe;
use certwatch_domain::{CertificateFields, DistinguishedName, DomainError};
use chrono::{DateTime, Utc};
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, WebPkiSupportedAlgorithms};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, SignatureScheme};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::debug;
use x509_parser::prelude::*;

/// Accepts any server certificate.
///
/// The probe reports on certificates, so expired, self-signed or mismatched
/// ones must still complete the handshake. Handshake signatures are still
/// checked so the peer has to hold the key for the certificate it sent.
#[derive(Debug)]
struct AcceptAnyCertificate {
    algorithms: WebPkiSupportedAlgorithms,
}

impl ServerCertVerifier for AcceptAnyCertificate {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(message, cert, dss, &self.algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(message, cert, dss, &self.algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.algorithms.supported_schemes()
    }
}

/// Reads the leaf certificate of a live TLS endpoint.
pub struct TlsCertificateProbe {
    connector: TlsConnector,
}

impl TlsCertificateProbe {
    pub fn new() -> Result<Self, DomainError> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let verifier = Arc::new(AcceptAnyCertificate {
            algorithms: provider.signature_verification_algorithms,
        });

        let config = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .map_err(|e| DomainError::Configuration(format!("TLS client setup failed: {e}")))?
            .dangerous()
            .with_custom_certificate_verifier(verifier)
            .with_no_client_auth();

        Ok(Self {
            connector: TlsConnector::from(Arc::new(config)),
        })
    }
}

#[async_trait]
impl CertificateProbe for TlsCertificateProbe {
    async fn probe(&self, host: &str, port: u16) -> Result<CertificateFields, DomainError> {
        let server_name = ServerName::try_from(host.to_string())
            .map_err(|e| DomainError::ProbeFailed(format!("invalid server name '{host}': {e}")))?;

        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|e| DomainError::ProbeFailed(format!("connect to {host}:{port}: {e}")))?;

        let tls = self
            .connector
            .connect(server_name, stream)
            .await
            .map_err(|e| DomainError::ProbeFailed(format!("TLS handshake with {host}:{port}: {e}")))?;

        let (_, session) = tls.get_ref();
        let leaf = session
            .peer_certificates()
            .and_then(|chain| chain.first())
            .ok_or_else(|| {
                DomainError::ProbeFailed(format!("{host}:{port} presented no certificate"))
            })?;

        debug!(domain = %host, port, der_len = leaf.len(), "Received peer certificate");
        parse_certificate(leaf.as_ref())
    }
}

fn first_value<'r, 'a: 'r>(
    mut values: impl Iterator<Item = &'r AttributeTypeAndValue<'a>>,
) -> Option<String> {
    values
        .next()
        .and_then(|value| value.as_str().ok())
        .map(str::to_string)
}

fn distinguished_name(name: &X509Name<'_>) -> DistinguishedName {
    DistinguishedName {
        common_name: first_value(name.iter_common_name()),
        organization: first_value(name.iter_organization()),
        organizational_unit: first_value(name.iter_organizational_unit()),
    }
}

fn instant(time: ASN1Time, field: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::<Utc>::from_timestamp(time.timestamp(), 0)
        .ok_or_else(|| DomainError::ProbeFailed(format!("certificate {field} out of range")))
}

/// Colon-separated uppercase SHA-256 of the DER encoding.
fn fingerprint(der: &[u8]) -> String {
    Sha256::digest(der)
        .iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// Extracts the fields the service reports from a DER certificate.
pub fn parse_certificate(der: &[u8]) -> Result<CertificateFields, DomainError> {
    let (_, cert) = X509Certificate::from_der(der)
        .map_err(|e| DomainError::ProbeFailed(format!("failed to parse certificate: {e}")))?;

    Ok(CertificateFields {
        subject: distinguished_name(cert.subject()),
        issuer: distinguished_name(cert.issuer()),
        not_before: instant(cert.validity().not_before, "notBefore")?,
        not_after: instant(cert.validity().not_after, "notAfter")?,
        serial_number: cert.serial.to_str_radix(16).to_uppercase(),
        fingerprint: fingerprint(der),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_format() {
        let value = fingerprint(b"certwatch");
        assert_eq!(value.len(), 32 * 3 - 1);
        for pair in value.split(':') {
            assert_eq!(pair.len(), 2);
            assert!(pair.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let result = parse_certificate(b"not a certificate");
        assert!(matches!(result, Err(DomainError::ProbeFailed(_))));
    }

    #[test]
    fn test_client_config_builds() {
        assert!(TlsCertificateProbe::new().is_ok());
    }
}
