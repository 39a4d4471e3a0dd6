pub mod dns_probe;
pub mod tls_probe;

pub use dns_probe::HickoryDnsProbe;
pub use tls_probe::{parse_certificate, TlsCertificateProbe};
