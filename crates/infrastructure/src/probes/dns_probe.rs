use async_trait::async_trait;
use certwatch_application::ports::DnsProbe;
use certwatch_domain::DomainError;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use std::time::Duration;
use tracing::warn;

/// DNS lookups through hickory's async resolver.
pub struct HickoryDnsProbe {
    resolver: TokioAsyncResolver,
}

impl HickoryDnsProbe {
    /// Uses the host's resolver configuration, falling back to public
    /// defaults when it cannot be read.
    pub fn new(lookup_timeout: Duration) -> Self {
        let (config, mut opts) = match hickory_resolver::system_conf::read_system_conf() {
            Ok(system) => system,
            Err(e) => {
                warn!(error = %e, "Could not read system resolver config, using defaults");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };
        opts.timeout = lookup_timeout;
        opts.attempts = 1;

        Self::with_config(config, opts)
    }

    pub fn with_config(config: ResolverConfig, opts: ResolverOpts) -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
        }
    }
}

fn lookup_error(host: &str, record: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::ProbeFailed(format!("{record} lookup for {host} failed: {e}"))
}

#[async_trait]
impl DnsProbe for HickoryDnsProbe {
    async fn name_servers(&self, host: &str) -> Result<Vec<String>, DomainError> {
        let lookup = self
            .resolver
            .ns_lookup(host)
            .await
            .map_err(|e| lookup_error(host, "NS", e))?;

        Ok(lookup
            .iter()
            .map(|ns| ns.to_string().trim_end_matches('.').to_string())
            .collect())
    }

    async fn addresses(&self, host: &str) -> Result<Vec<String>, DomainError> {
        let lookup = self
            .resolver
            .lookup_ip(host)
            .await
            .map_err(|e| lookup_error(host, "A/AAAA", e))?;

        Ok(lookup.iter().map(|ip| ip.to_string()).collect())
    }
}
