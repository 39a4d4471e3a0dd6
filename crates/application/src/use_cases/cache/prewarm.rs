use certwatch_domain::config::BulkConfig;
use certwatch_domain::DomainError;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

use crate::ports::DomainRepository;
use crate::services::CertificateFetcher;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrewarmSummary {
    pub attempted: usize,
    pub warmed: usize,
    pub failed: usize,
}

/// Fills the certificate cache with the newest monitored domains at startup.
pub struct PrewarmCacheUseCase {
    repository: Arc<dyn DomainRepository>,
    fetcher: Arc<CertificateFetcher>,
    limit: usize,
    batch_size: usize,
    pause: Duration,
}

impl PrewarmCacheUseCase {
    pub fn new(
        repository: Arc<dyn DomainRepository>,
        fetcher: Arc<CertificateFetcher>,
        config: &BulkConfig,
    ) -> Self {
        Self {
            repository,
            fetcher,
            limit: config.prewarm_limit,
            batch_size: config.prewarm_batch_size,
            pause: config.prewarm_pause(),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<PrewarmSummary, DomainError> {
        if self.limit == 0 {
            return Ok(PrewarmSummary::default());
        }

        let domains = self.repository.list().await?;
        let targets: Vec<_> = domains.into_iter().take(self.limit).collect();
        let port = self.fetcher.default_port();
        let mut summary = PrewarmSummary {
            attempted: targets.len(),
            ..Default::default()
        };

        for (index, batch) in targets.chunks(self.batch_size.max(1)).enumerate() {
            if index > 0 && !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }

            let results = join_all(
                batch
                    .iter()
                    .map(|record| self.fetcher.resolve_certificate(&record.domain, port)),
            )
            .await;

            for result in results {
                match result {
                    Ok(_) => summary.warmed += 1,
                    Err(_) => summary.failed += 1,
                }
            }
        }

        info!(
            attempted = summary.attempted,
            warmed = summary.warmed,
            failed = summary.failed,
            "Certificate cache prewarmed"
        );
        Ok(summary)
    }
}
