use crate::{CertificateInfo, DnsInfo};
use serde::{Deserialize, Serialize};

/// A domain registered for certificate monitoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredDomain {
    pub id: i64,
    pub domain: String,
    pub created_at: String,
}

impl MonitoredDomain {
    pub fn new(id: i64, domain: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id,
            domain: domain.into(),
            created_at: created_at.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentStatus {
    Success,
    Error,
}

/// Certificate data shown in domain listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateSummary {
    pub registrar: String,
    pub expiration_date: Option<i64>,
    pub issued_date: Option<i64>,
    pub raw_issued_date: String,
    pub raw_expiry_date: String,
}

impl From<&CertificateInfo> for CertificateSummary {
    fn from(info: &CertificateInfo) -> Self {
        Self {
            registrar: info.registrar().to_string(),
            expiration_date: info.expiration_unix(),
            issued_date: info.issued_unix(),
            raw_issued_date: info.issued_on.clone(),
            raw_expiry_date: info.expires_on.clone(),
        }
    }
}

/// A monitored domain joined with its certificate and DNS data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedDomain {
    #[serde(flatten)]
    pub record: MonitoredDomain,
    pub data: Option<CertificateSummary>,
    pub name_servers: Vec<String>,
    pub addresses: Vec<String>,
    pub status: EnrichmentStatus,
    pub last_checked_at: String,
}

impl EnrichedDomain {
    pub fn success(
        record: MonitoredDomain,
        certificate: &CertificateInfo,
        dns: Option<DnsInfo>,
        checked_at: String,
    ) -> Self {
        let dns = dns.unwrap_or_default();
        Self {
            record,
            data: Some(CertificateSummary::from(certificate)),
            name_servers: dns.name_servers,
            addresses: dns.addresses,
            status: EnrichmentStatus::Success,
            last_checked_at: checked_at,
        }
    }

    pub fn failure(record: MonitoredDomain, dns: Option<DnsInfo>, checked_at: String) -> Self {
        let dns = dns.unwrap_or_default();
        Self {
            record,
            data: None,
            name_servers: dns.name_servers,
            addresses: dns.addresses,
            status: EnrichmentStatus::Error,
            last_checked_at: checked_at,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == EnrichmentStatus::Success
    }
}
