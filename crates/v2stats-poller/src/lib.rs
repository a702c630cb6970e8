//! v2stats-poller — drives the fetch → parse → update → publish cycle.
//!
//! # Architecture
//!
//! ```text
//! Poller (single background task)
//!   ├── StatsSource::query_stats("", false)   ← Fetching
//!   ├── parse() every record                  ← Parsing
//!   ├── TrafficStore::upsert()                ← Updating
//!   ├── TrafficStore::advance(User)
//!   │     └── MetricResolver::resolve().inc_by(delta)  ← Publishing
//!   └── sleep(interval) / shutdown            ← Sleeping
//! ```
//!
//! A failed fetch or a malformed record name abandons the cycle without
//! touching the store. Nothing is retried until the next interval.

pub mod error;
pub mod poller;

pub use error::PollError;
pub use poller::{CycleReport, Poller};
