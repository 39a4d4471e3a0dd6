//! # certwatch
//!
//! TLS certificate expiry monitor with a JSON API

mod bootstrap;
mod di;
mod server;

use bootstrap::{init_database, init_logging, load_config};
use certwatch_domain::CliOverrides;
use certwatch_jobs::{DnsRefreshJob, ExpiryCheckJob, JobRunner};
use clap::Parser;
use di::{Repositories, Services, UseCases};
use server::start_web_server;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "certwatch")]
#[command(version)]
#[command(about = "Watches TLS certificates of registered domains and warns before they expire")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<String>,

    /// HTTP port
    #[arg(short, long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short, long)]
    bind: Option<String>,

    /// SQLite database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind,
        database_path: cli.database,
        log_level: cli.log_level,
    };

    let config = load_config(cli.config.as_deref(), overrides)?;
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = cli.config.as_deref().unwrap_or("default"),
        port = config.server.port,
        bind = %config.server.bind_address,
        "Starting certwatch"
    );

    let pool = init_database(&config.database).await?;
    let repos = Repositories::new(pool);
    let services = Services::new(&config, &repos)?;
    let use_cases = UseCases::new(&config, &repos, &services);

    let shutdown = CancellationToken::new();

    let prewarm = use_cases.prewarm.clone();
    tokio::spawn(async move {
        match prewarm.execute().await {
            Ok(summary) => info!(
                attempted = summary.attempted,
                warmed = summary.warmed,
                failed = summary.failed,
                "Certificate cache prewarmed"
            ),
            Err(e) => error!(error = %e, "Certificate cache prewarm failed"),
        }
    });

    let alert_schedules = if config.alerts.enabled {
        config.alerts.schedules.clone()
    } else {
        Vec::new()
    };

    JobRunner::new(shutdown.clone())
        .with_dns_refresh(
            DnsRefreshJob::new(use_cases.drain_refresh.clone())
                .with_interval(config.refresh.interval_secs)
                .with_batch_size(config.refresh.batch_size),
        )
        .with_expiry_check(ExpiryCheckJob::new(
            use_cases.check_expiry.clone(),
            alert_schedules,
            config.display_timezone()?,
            services.clock.clone(),
        ))
        .start()
        .await;

    let bind_addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.port).parse()?;

    let result = start_web_server(
        bind_addr,
        use_cases.app_state(),
        &config.server,
        shutdown.clone(),
    )
    .await;

    shutdown.cancel();
    services.clear();
    info!("certwatch stopped");

    result
}
