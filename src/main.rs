//! classwatch - schedule-change notifier
//!
//! Watches a tabular schedule-change feed and posts upcoming cancellations
//! and substitutions for one group to a Telegram chat, exactly once per
//! distinct message.
//!
//! Module structure:
//! - `domain/` - Core business types (RawRow, ScheduleChange, rendering)
//! - `io/` - External interfaces (CSV feed, Telegram delivery)
//! - `services/` - Business logic (filter, classifier, dedup, scheduler)
//! - `infra/` - Infrastructure (Config)

use clap::Parser;
use classwatch::infra::Config;
use classwatch::io::{SheetFetcher, TelegramNotifier};
use classwatch::services::Scheduler;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// classwatch - schedule-change notification service
#[derive(Parser, Debug)]
#[command(name = "classwatch", version, about)]
struct Args {
    /// Path to TOML configuration file (falls back to CONFIG_FILE env,
    /// then config/dev.toml)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    // Default: INFO, use RUST_LOG=debug for per-row filter decisions
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!("classwatch starting");

    let args = Args::parse();
    let config_path = Config::resolve_config_path(args.config.as_deref());

    // Missing required configuration is the only fatal error
    let config = Config::from_file(&config_path)?;

    info!(
        config_file = %config.config_file(),
        group_id = %config.group_id(),
        check_times = ?config.check_times(),
        cutoff = ?config.cutoff(),
        feed_timeout_ms = %config.feed_timeout_ms(),
        "config_loaded"
    );

    let fetcher = SheetFetcher::new(&config)?;
    let notifier = TelegramNotifier::new(&config)?;

    // Handle shutdown on Ctrl+C
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("shutdown_signal_received");
        let _ = shutdown_tx.send(true);
    });

    // Run the poll loop - sequential by construction, no overlapping cycles
    let scheduler = Scheduler::new(config, fetcher, notifier);
    scheduler.run(shutdown_rx).await;

    info!("classwatch shutdown complete");
    Ok(())
}
