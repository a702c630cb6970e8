//! The poll loop.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use v2stats_client::StatsSource;
use v2stats_core::{Category, Direction, DirectionToken, TrafficStore, parse};
use v2stats_metrics::{CycleOutcome, ExporterMetrics, MetricResolver};

use crate::error::PollError;

/// Summary of one completed cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Records returned by the backend.
    pub received: usize,
    /// Records folded into the store.
    pub applied: usize,
    /// Records dropped for an unrecognized direction.
    pub dropped: usize,
    /// User entities with at least one counter updated.
    pub published: usize,
}

/// A record that passed parsing and is ready to be applied.
struct Update {
    category: Category,
    identity: String,
    direction: Direction,
    value: i64,
}

/// Owns all per-process polling state. Cycles run strictly one after
/// another; nothing here is shared with other tasks except through the
/// metrics registry.
pub struct Poller<S> {
    source: S,
    store: TrafficStore,
    resolver: MetricResolver,
    metrics: ExporterMetrics,
    interval: Duration,
}

impl<S: StatsSource> Poller<S> {
    pub fn new(
        source: S,
        resolver: MetricResolver,
        metrics: ExporterMetrics,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            store: TrafficStore::new(),
            resolver,
            metrics,
            interval,
        }
    }

    pub fn store(&self) -> &TrafficStore {
        &self.store
    }

    pub fn resolver(&self) -> &MetricResolver {
        &self.resolver
    }

    pub fn metrics(&self) -> &ExporterMetrics {
        &self.metrics
    }

    /// Run one fetch/parse/update/publish cycle.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, PollError> {
        let outcome = self.cycle().await;
        match &outcome {
            Ok(report) => {
                self.metrics.record_cycle(CycleOutcome::Ok);
                self.metrics.record_dropped(report.dropped as u64);
            }
            Err(PollError::Transport(_)) => self.metrics.record_cycle(CycleOutcome::TransportError),
            Err(PollError::Parse(_)) => self.metrics.record_cycle(CycleOutcome::ParseError),
        }
        outcome
    }

    async fn cycle(&mut self) -> Result<CycleReport, PollError> {
        let records = self.source.query_stats("", false).await?;

        let mut report = CycleReport {
            received: records.len(),
            ..Default::default()
        };

        // Parse everything first so a bad name leaves the store untouched.
        let mut updates = Vec::with_capacity(records.len());
        for record in records {
            let parsed = parse(&record.name)?;
            match parsed.direction {
                DirectionToken::Known(direction) => updates.push(Update {
                    category: parsed.category,
                    identity: parsed.identity,
                    direction,
                    value: record.value,
                }),
                DirectionToken::Unrecognized(token) => {
                    warn!(name = %record.name, %token, "unrecognized traffic direction, record dropped");
                    report.dropped += 1;
                }
            }
        }

        for u in &updates {
            self.store.upsert(u.category, &u.identity, u.direction, u.value);
        }
        report.applied = updates.len();

        // Inbound entities are tracked but not published.
        for (key, delta) in self.store.advance(Category::User) {
            let mut updated = false;
            for direction in [Direction::Uplink, Direction::Downlink] {
                match self.resolver.resolve(key.category, &key.identity, direction) {
                    Ok(counter) => {
                        counter.inc_by(delta.get(direction) as f64);
                        updated = true;
                    }
                    Err(e) => {
                        warn!(entity = %key, traffic = direction.short(), error = %e, "failed to publish delta");
                    }
                }
            }
            if updated {
                report.published += 1;
            }
        }

        Ok(report)
    }

    /// Poll forever at a fixed interval, until `shutdown` changes.
    ///
    /// The first cycle runs immediately. Shutdown is observed only while
    /// sleeping; an in-flight cycle always completes.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(interval = ?self.interval, "poller started");

        loop {
            match self.run_cycle().await {
                Ok(report) => debug!(
                    received = report.received,
                    applied = report.applied,
                    dropped = report.dropped,
                    published = report.published,
                    "poll cycle complete"
                ),
                Err(e) => error!(error = %e, "poll cycle failed"),
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.changed() => {
                    info!("poller shutting down");
                    break;
                }
            }
        }
    }
}
