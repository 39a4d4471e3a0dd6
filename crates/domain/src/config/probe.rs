use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Budgets of the outbound TLS and DNS probes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    /// TLS handshake timeout in milliseconds (default: 6000)
    #[serde(default = "default_tls_timeout")]
    pub tls_timeout_ms: u64,

    /// Port probed when none is given (default: 443)
    #[serde(default = "default_port")]
    pub default_port: u16,

    /// Timeout of each DNS lookup (NS, addresses) in milliseconds (default: 1500)
    #[serde(default = "default_dns_lookup_timeout")]
    pub dns_lookup_timeout_ms: u64,

    /// Shared deadline for all DNS lookups of one host in milliseconds (default: 2000).
    /// The lookups run concurrently, so this only caps them when it is lower
    /// than `dns_lookup_timeout_ms`.
    #[serde(default = "default_dns_total_timeout")]
    pub dns_total_timeout_ms: u64,

    /// IANA timezone certificate dates are rendered in (default: "Asia/Kolkata")
    #[serde(default = "default_display_timezone")]
    pub display_timezone: String,
}

impl ProbeConfig {
    pub fn tls_timeout(&self) -> Duration {
        Duration::from_millis(self.tls_timeout_ms)
    }

    pub fn dns_lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_lookup_timeout_ms)
    }

    pub fn dns_total_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_total_timeout_ms)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            tls_timeout_ms: default_tls_timeout(),
            default_port: default_port(),
            dns_lookup_timeout_ms: default_dns_lookup_timeout(),
            dns_total_timeout_ms: default_dns_total_timeout(),
            display_timezone: default_display_timezone(),
        }
    }
}

fn default_tls_timeout() -> u64 {
    6000
}

fn default_port() -> u16 {
    443
}

fn default_dns_lookup_timeout() -> u64 {
    1500
}

fn default_dns_total_timeout() -> u64 {
    2000
}

fn default_display_timezone() -> String {
    "Asia/Kolkata".to_string()
}
