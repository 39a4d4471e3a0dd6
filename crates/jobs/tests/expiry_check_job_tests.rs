use certwatch_application::ports::Clock;
use certwatch_application::use_cases::CheckExpiryUseCase;
use certwatch_domain::config::AlertSchedule;
use certwatch_domain::ExpiryThreshold;
use certwatch_jobs::ExpiryCheckJob;
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;

mod helpers;
use helpers::{
    build_fetcher, manual_clock, MockCertificateProbe, MockDnsProbe, MockDomainRepository,
    RecordingNotifier,
};

// 2025-01-01T08:59:50+05:30
const NOW: i64 = 1_735_702_190;
const DAY: i64 = 86_400;

#[tokio::test(start_paused = true)]
async fn test_job_runs_check_at_local_alert_time_once() {
    let clock = manual_clock(NOW);
    let dyn_clock: Arc<dyn Clock> = clock.clone();
    let certificate_probe = MockCertificateProbe::default();
    certificate_probe.set_expiry("week.example", NOW + 7 * DAY + 3_600).await;
    certificate_probe.set_expiry("month.example", NOW + 30 * DAY).await;
    let repository = MockDomainRepository::with_domains(&["week.example", "month.example"]).await;
    let notifier = RecordingNotifier::default();

    let check = Arc::new(CheckExpiryUseCase::new(
        Arc::new(repository),
        build_fetcher(&certificate_probe, &MockDnsProbe::default(), dyn_clock.clone()),
        Arc::new(notifier.clone()),
        dyn_clock.clone(),
    ));

    let token = CancellationToken::new();
    let job = ExpiryCheckJob::new(
        check,
        vec![AlertSchedule::new(ExpiryThreshold::SevenDays, 9, 0)],
        chrono_tz::Asia::Kolkata,
        dyn_clock,
    )
    .with_cancellation(token.clone());
    Arc::new(job).start().await;

    sleep(Duration::from_secs(5)).await;
    assert!(notifier.alerts().await.is_empty());

    sleep(Duration::from_secs(6)).await;
    let alerts = notifier.alerts().await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].threshold, ExpiryThreshold::SevenDays);
    assert_eq!(alerts[0].domains.len(), 1);
    assert_eq!(alerts[0].domains[0].domain, "week.example");

    // the manual clock did not move, the job must still wait a full day
    sleep(Duration::from_secs(60)).await;
    assert_eq!(notifier.alerts().await.len(), 1);

    token.cancel();
}
