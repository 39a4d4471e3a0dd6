use crate::{DnsRefreshJob, ExpiryCheckJob};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Jobs actually started by [`JobRunner::start`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartedJobs {
    pub dns_refresh: bool,
    pub expiry_check: bool,
}

/// Starts the background jobs under one shutdown token.
///
/// An expiry check registered without alert schedules is skipped, so
/// disabling alerts means registering it with none.
pub struct JobRunner {
    shutdown: CancellationToken,
    dns_refresh: Option<DnsRefreshJob>,
    expiry_check: Option<ExpiryCheckJob>,
}

impl JobRunner {
    pub fn new(shutdown: CancellationToken) -> Self {
        Self {
            shutdown,
            dns_refresh: None,
            expiry_check: None,
        }
    }

    pub fn with_dns_refresh(mut self, job: DnsRefreshJob) -> Self {
        self.dns_refresh = Some(job.with_cancellation(self.shutdown.clone()));
        self
    }

    pub fn with_expiry_check(mut self, job: ExpiryCheckJob) -> Self {
        self.expiry_check = Some(job.with_cancellation(self.shutdown.clone()));
        self
    }

    pub async fn start(self) -> StartedJobs {
        let mut started = StartedJobs::default();

        if let Some(job) = self.dns_refresh {
            Arc::new(job).start().await;
            started.dns_refresh = true;
        }

        match self.expiry_check {
            Some(job) if job.has_schedules() => {
                Arc::new(job).start().await;
                started.expiry_check = true;
            }
            Some(_) => info!("Expiry alerts disabled, expiry check job not started"),
            None => {}
        }

        info!(
            dns_refresh = started.dns_refresh,
            expiry_check = started.expiry_check,
            "Background jobs started"
        );
        started
    }
}
