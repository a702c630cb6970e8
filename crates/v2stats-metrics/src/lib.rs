//! v2stats-metrics — publishes traffic deltas as Prometheus counters.
//!
//! # Architecture
//!
//! ```text
//! MetricResolver
//!   ├── resolve() → cached Counter, registered on first sight
//!   └── registry  → shared with the HTTP layer
//!
//! ExporterMetrics → poll outcome counters
//! render()        → text/plain exposition for the /metrics endpoint
//! ```
//!
//! The `prometheus::Registry` is internally synchronized, so the poll loop
//! can increment counters while the HTTP server encodes them.

pub mod error;
pub mod exporter;
pub mod host;
pub mod render;
pub mod resolver;

pub use error::MetricsError;
pub use exporter::{CycleOutcome, ExporterMetrics};
pub use host::{host_label, hostname};
pub use render::{CONTENT_TYPE, render};
pub use resolver::{MetricResolver, metric_key};
