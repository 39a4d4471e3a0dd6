use serde::{Deserialize, Serialize};

/// Best-known DNS snapshot for a host.
///
/// Either list may be empty when its lookup failed or ran out of time;
/// that is a valid, non-error result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsInfo {
    pub name_servers: Vec<String>,
    pub addresses: Vec<String>,
    /// Milliseconds since the Unix epoch.
    pub cached_at: u64,
}

impl DnsInfo {
    pub fn new(name_servers: Vec<String>, addresses: Vec<String>, cached_at: u64) -> Self {
        Self {
            name_servers,
            addresses,
            cached_at,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name_servers.is_empty() && self.addresses.is_empty()
    }
}
