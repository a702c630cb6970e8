//! v2stats-core — the delta engine behind the V2Ray traffic exporter.
//!
//! V2Ray's stats service reports cumulative byte counters keyed by
//! `>>>`-delimited names. This crate turns those raw records into
//! per-interval increments that can be added to Prometheus counters.
//!
//! # Architecture
//!
//! ```text
//! StatRecord { name, value }
//!   ├── parser::parse()        → ParsedName (category, identity, direction)
//!   ├── TrafficStore::upsert() → overwrites up_total / down_total
//!   └── delta::advance()       → TrafficDelta, moves the watermark
//! ```
//!
//! The `TrafficStore` has a single owner (the poll loop) and needs no
//! locking. Records are never evicted.

pub mod config;
pub mod delta;
pub mod error;
pub mod parser;
pub mod store;
pub mod types;

pub use config::ExporterConfig;
pub use delta::{advance, compute_delta};
pub use error::{ConfigError, ParseError};
pub use parser::parse;
pub use store::TrafficStore;
pub use types::*;
