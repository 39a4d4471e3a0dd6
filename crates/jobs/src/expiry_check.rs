use certwatch_application::ports::Clock;
use certwatch_application::use_cases::CheckExpiryUseCase;
use certwatch_domain::config::AlertSchedule;
use certwatch_domain::ExpiryThreshold;
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// First instant strictly after `now` at `hour:minute` local time in `timezone`.
fn next_occurrence(
    now: DateTime<Utc>,
    hour: u32,
    minute: u32,
    timezone: Tz,
) -> Option<DateTime<Utc>> {
    let mut date = now.with_timezone(&timezone).date_naive();

    // a local time can be skipped by a DST jump, so look a few days ahead
    for _ in 0..3 {
        let local = date.and_hms_opt(hour, minute, 0)?;
        if let Some(candidate) = timezone.from_local_datetime(&local).earliest() {
            let candidate = candidate.with_timezone(&Utc);
            if candidate > now {
                return Some(candidate);
            }
        }
        date = date.succ_opt()?;
    }

    None
}

/// Earliest upcoming schedule slot and every threshold due at that instant.
pub fn next_run(
    now: DateTime<Utc>,
    schedules: &[AlertSchedule],
    timezone: Tz,
) -> Option<(DateTime<Utc>, Vec<ExpiryThreshold>)> {
    let mut next: Option<(DateTime<Utc>, Vec<ExpiryThreshold>)> = None;

    for schedule in schedules {
        let Some(at) = next_occurrence(now, schedule.hour, schedule.minute, timezone) else {
            continue;
        };
        let earlier = match &next {
            Some((current, _)) => at < *current,
            None => true,
        };
        if earlier {
            next = Some((at, vec![schedule.threshold]));
        } else if let Some((current, thresholds)) = &mut next {
            if *current == at {
                thresholds.push(schedule.threshold);
            }
        }
    }

    next
}

/// Runs the expiry check for each configured threshold once a day at its
/// local alert time.
pub struct ExpiryCheckJob {
    check: Arc<CheckExpiryUseCase>,
    schedules: Vec<AlertSchedule>,
    timezone: Tz,
    clock: Arc<dyn Clock>,
    shutdown: CancellationToken,
}

impl ExpiryCheckJob {
    pub fn new(
        check: Arc<CheckExpiryUseCase>,
        schedules: Vec<AlertSchedule>,
        timezone: Tz,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            check,
            schedules,
            timezone,
            clock,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn has_schedules(&self) -> bool {
        !self.schedules.is_empty()
    }

    fn now(&self) -> DateTime<Utc> {
        let millis = i64::try_from(self.clock.now_millis()).unwrap_or(i64::MAX);
        DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default()
    }

    pub async fn start(self: Arc<Self>) {
        if self.schedules.is_empty() {
            info!("No expiry alert schedules configured, expiry check job not started");
            return;
        }

        info!(
            schedules = self.schedules.len(),
            timezone = %self.timezone,
            "Starting expiry check job"
        );

        tokio::spawn(async move {
            let mut last_fired: Option<DateTime<Utc>> = None;

            loop {
                let now = match last_fired {
                    Some(fired) => self.now().max(fired),
                    None => self.now(),
                };
                let Some((at, thresholds)) = next_run(now, &self.schedules, self.timezone) else {
                    error!("ExpiryCheckJob: no upcoming schedule could be computed");
                    break;
                };
                let wait = (at - now).to_std().unwrap_or_default();

                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("ExpiryCheckJob: shutting down");
                        break;
                    }
                    _ = tokio::time::sleep(wait) => {
                        for threshold in thresholds {
                            match self.check.execute(threshold).await {
                                Ok(Some(alert)) => info!(
                                    threshold = %threshold,
                                    domains = alert.domains.len(),
                                    "ExpiryCheckJob: alert raised"
                                ),
                                Ok(None) => {
                                    info!(threshold = %threshold, "ExpiryCheckJob: nothing expiring")
                                }
                                Err(e) => error!(
                                    threshold = %threshold,
                                    error = %e,
                                    "ExpiryCheckJob: check failed"
                                ),
                            }
                        }
                        last_fired = Some(at);
                    }
                }
            }
        });
    }
}
