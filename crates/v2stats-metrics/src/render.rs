//! Prometheus text exposition format.
//!
//! Encodes everything registered in a registry for scraping by a Prometheus
//! server or compatible agent.

use prometheus::{Encoder, Registry, TextEncoder};

use crate::error::MetricsError;

/// Content type of the text exposition format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Render all metric families in `registry`.
pub fn render(registry: &Registry) -> Result<String, MetricsError> {
    let families = registry.gather();
    let mut buf = Vec::new();
    TextEncoder::new()
        .encode(&families, &mut buf)
        .map_err(|e| MetricsError::Encode(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| MetricsError::Encode(e.to_string()))
}
