use certwatch_application::use_cases::DrainRefreshQueueUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Drains the DNS refresh queue on a fixed interval.
pub struct DnsRefreshJob {
    drain: Arc<DrainRefreshQueueUseCase>,
    batch_size: usize,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl DnsRefreshJob {
    pub fn new(drain: Arc<DrainRefreshQueueUseCase>) -> Self {
        Self {
            drain,
            batch_size: 3,
            interval_secs: 5,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            batch_size = self.batch_size,
            "Starting DNS refresh job"
        );

        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(self.interval_secs.max(1)));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("DnsRefreshJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let processed = self.drain.execute(self.batch_size).await;
                        if processed > 0 {
                            debug!(processed, "DnsRefreshJob: batch drained");
                        }
                    }
                }
            }
        });
    }
}
