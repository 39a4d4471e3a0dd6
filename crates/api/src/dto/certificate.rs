use certwatch_application::use_cases::CertificateReport;
use certwatch_domain::CertificateInfo;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CertificateQuery {
    pub domain: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkQuery {
    #[serde(default = "default_fast")]
    pub fast: bool,
}

fn default_fast() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct CertificateInfoResponse {
    #[serde(flatten)]
    pub certificate: CertificateInfo,
    pub expiration_date_unix: Option<i64>,
    pub issued_date_unix: Option<i64>,
    pub name_servers: Vec<String>,
    pub addresses: Vec<String>,
    /// DNS data was not cached and a background lookup was scheduled.
    pub dns_pending: bool,
}

impl From<CertificateReport> for CertificateInfoResponse {
    fn from(report: CertificateReport) -> Self {
        let dns_pending = report.dns.is_none();
        let dns = report.dns.unwrap_or_default();
        Self {
            certificate: (*report.certificate).clone(),
            expiration_date_unix: report.expiration_date_unix,
            issued_date_unix: report.issued_date_unix,
            name_servers: dns.name_servers,
            addresses: dns.addresses,
            dns_pending,
        }
    }
}
