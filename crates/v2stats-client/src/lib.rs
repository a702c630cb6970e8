//! v2stats-client — reads cumulative counters from V2Ray.
//!
//! Wraps the `v2ray.core.app.stats.command.StatsService/QueryStats` RPC
//! behind the [`StatsSource`] trait so the poll loop can be driven by a
//! scripted source in tests.
//!
//! # Architecture
//!
//! ```text
//! StatsSource (trait)
//!   ├── V2RayStatsClient → dials a fresh channel per query, bounded by timeout
//!   └── test doubles     → scripted responses
//! ```

pub mod client;
pub mod error;

/// Generated protobuf types and gRPC client stubs.
pub mod proto {
    tonic::include_proto!("v2ray.core.app.stats.command");
}

pub use client::{StatsFuture, StatsSource, V2RayStatsClient};
pub use error::ClientError;
