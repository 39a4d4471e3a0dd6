use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

const NOT_AVAILABLE: &str = "<N/A>";

/// Raw name attributes as read from a certificate subject or issuer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistinguishedName {
    pub common_name: Option<String>,
    pub organization: Option<String>,
    pub organizational_unit: Option<String>,
}

/// Fields returned by a successful certificate probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateFields {
    pub subject: DistinguishedName,
    pub issuer: DistinguishedName,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    pub serial_number: String,
    pub fingerprint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateParty {
    pub common_name: String,
    pub organization: String,
    pub organizational_unit: String,
}

/// Normalized certificate metadata, as cached and served.
///
/// `issued_on` and `expires_on` are RFC 3339 timestamps rendered in the
/// display timezone, so they carry an explicit offset and can always be
/// converted back to Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateInfo {
    pub domain: String,
    pub subject: CertificateParty,
    pub issuer: CertificateParty,
    pub issued_on: String,
    pub expires_on: String,
    pub serial_number: String,
    pub fingerprint: String,
    pub fetch_time_ms: u64,
}

impl CertificateInfo {
    pub fn from_fields(
        domain: &str,
        fields: CertificateFields,
        timezone: Tz,
        fetch_time_ms: u64,
    ) -> Self {
        let subject = CertificateParty {
            common_name: fields.subject.common_name.unwrap_or_default(),
            organization: fields
                .subject
                .organization
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            organizational_unit: fields
                .subject
                .organizational_unit
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        };

        let issuer = CertificateParty {
            common_name: fields.issuer.common_name.unwrap_or_default(),
            organization: fields.issuer.organization.unwrap_or_default(),
            organizational_unit: fields
                .issuer
                .organizational_unit
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        };

        Self {
            domain: domain.to_string(),
            subject,
            issuer,
            issued_on: format_instant(fields.not_before, timezone),
            expires_on: format_instant(fields.not_after, timezone),
            serial_number: fields.serial_number,
            fingerprint: fields.fingerprint,
            fetch_time_ms,
        }
    }

    pub fn expiration_unix(&self) -> Option<i64> {
        parse_unix(&self.expires_on)
    }

    pub fn issued_unix(&self) -> Option<i64> {
        parse_unix(&self.issued_on)
    }

    /// Issuer organization, or `-` when the certificate does not name one.
    pub fn registrar(&self) -> &str {
        if self.issuer.organization.is_empty() {
            "-"
        } else {
            &self.issuer.organization
        }
    }
}

/// Renders `instant` in `timezone` as RFC 3339 with second precision.
pub fn format_instant(instant: DateTime<Utc>, timezone: Tz) -> String {
    instant
        .with_timezone(&timezone)
        .to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Unix seconds of an RFC 3339 timestamp, `None` if it does not parse.
pub fn parse_unix(raw: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.timestamp())
}
