//! Counters describing the exporter's own polling.

use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

use crate::error::MetricsError;

/// How a poll cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Ok,
    TransportError,
    ParseError,
}

impl CycleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleOutcome::Ok => "ok",
            CycleOutcome::TransportError => "transport_error",
            CycleOutcome::ParseError => "parse_error",
        }
    }
}

#[derive(Clone)]
pub struct ExporterMetrics {
    cycles: IntCounterVec,
    dropped_records: IntCounter,
}

impl ExporterMetrics {
    /// Create the counters and register them in `registry`.
    pub fn register(registry: &Registry) -> Result<Self, MetricsError> {
        let cycles = IntCounterVec::new(
            Opts::new("v2stats_poll_cycles_total", "Poll cycles by result."),
            &["result"],
        )?;
        let dropped_records = IntCounter::with_opts(Opts::new(
            "v2stats_dropped_records_total",
            "Stat records dropped for an unrecognized direction.",
        ))?;

        registry.register(Box::new(cycles.clone()))?;
        registry.register(Box::new(dropped_records.clone()))?;

        Ok(Self {
            cycles,
            dropped_records,
        })
    }

    pub fn record_cycle(&self, outcome: CycleOutcome) {
        self.cycles.with_label_values(&[outcome.as_str()]).inc();
    }

    pub fn record_dropped(&self, count: u64) {
        self.dropped_records.inc_by(count);
    }

    pub fn cycles(&self, outcome: CycleOutcome) -> u64 {
        self.cycles.with_label_values(&[outcome.as_str()]).get()
    }

    pub fn dropped(&self) -> u64 {
        self.dropped_records.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_are_counted_separately() {
        let registry = Registry::new();
        let m = ExporterMetrics::register(&registry).unwrap();

        m.record_cycle(CycleOutcome::Ok);
        m.record_cycle(CycleOutcome::Ok);
        m.record_cycle(CycleOutcome::TransportError);
        m.record_dropped(3);

        assert_eq!(m.cycles(CycleOutcome::Ok), 2);
        assert_eq!(m.cycles(CycleOutcome::TransportError), 1);
        assert_eq!(m.cycles(CycleOutcome::ParseError), 0);
        assert_eq!(m.dropped(), 3);
    }

    #[test]
    fn double_registration_fails() {
        let registry = Registry::new();
        ExporterMetrics::register(&registry).unwrap();
        assert!(ExporterMetrics::register(&registry).is_err());
    }
}
