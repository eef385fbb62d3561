//! The poll-and-dispatch control loop
//!
//! One sequential loop drives the whole pipeline: fetch -> filter ->
//! classify -> compose -> dedup -> deliver. Cycles run strictly one at a
//! time, so the dedup cache needs no locking. Transport failures are
//! logged and the cycle skipped; nothing in a cycle can take the loop down.

use crate::domain::{compose_batch, ScheduleChange};
use crate::infra::config::Config;
use crate::io::{FeedSource, Notifier};
use crate::services::{Classifier, Deduplicator, RowFilter, TimeGate};
use chrono::{Local, NaiveDate};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Tick granularity of the loop. Well under a minute so no HH:MM check
/// point can fall between two ticks.
const TICK: Duration = Duration::from_secs(20);

pub struct Scheduler<F: FeedSource, N: Notifier> {
    config: Config,
    feed: F,
    notifier: N,
    filter: RowFilter,
    classifier: Classifier,
    dedup: Deduplicator,
    gate: TimeGate,
}

impl<F: FeedSource, N: Notifier> Scheduler<F, N> {
    pub fn new(config: Config, feed: F, notifier: N) -> Self {
        let filter = RowFilter::new(config.group_id());
        let classifier = Classifier::new(config.cancel_marker());
        let gate = TimeGate::new(config.check_times());

        Self { config, feed, notifier, filter, classifier, dedup: Deduplicator::new(), gate }
    }

    /// Runs until the shutdown signal flips to true.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(TICK);
        info!(check_times = ?self.config.check_times(), "scheduler_started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = Local::now().naive_local();
                    if self.gate.should_fire(now) {
                        if let Err(e) = self.run_cycle(now.date()).await {
                            warn!(error = %e, "poll_cycle_failed");
                        }
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("scheduler_shutdown");
                        break;
                    }
                }
            }
        }
    }

    /// One complete poll cycle against the given reference day.
    pub async fn run_cycle(&mut self, today: NaiveDate) -> anyhow::Result<()> {
        let rows = self.feed.fetch().await?;
        let total_rows = rows.len();

        let cutoff = self.config.cutoff().cutoff_from(today);
        let kept = self.filter.filter(rows, cutoff);
        let changes: Vec<ScheduleChange> = self.classifier.classify(&kept);

        debug!(
            total_rows = total_rows,
            kept_rows = kept.len(),
            changes = changes.len(),
            "cycle_classified"
        );

        if changes.is_empty() {
            return Ok(());
        }

        let message = compose_batch(&changes);
        if !self.dedup.should_send(&message) {
            return Ok(());
        }

        self.notifier.deliver(&message).await?;
        info!(changes = changes.len(), "notification_sent");
        Ok(())
    }
}
