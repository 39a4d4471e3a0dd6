mod get_certificate;

pub use get_certificate::{CertificateReport, GetCertificateUseCase};
