//! Maps entities to their published counters.
//!
//! Each `(identity, direction)` gets one counter, created and registered the
//! first time it is resolved and reused for the life of the process:
//!
//! ```text
//! user_traffic_up{type="user",name="alice@example.com",traffic="up",host="edge-1:10085"}
//! ```

use std::collections::HashMap;

use prometheus::{Counter, Opts, Registry};
use sha2::{Digest, Sha256};
use tracing::debug;

use v2stats_core::{Category, Direction};

use crate::error::MetricsError;

const NAMESPACE: &str = "user";
const SUBSYSTEM: &str = "traffic";

/// Cache key for a counter: hex SHA-256 of `"{identity}_{up|down}"`.
///
/// Internal only; the exposed identity is the label set.
pub fn metric_key(identity: &str, direction: Direction) -> String {
    let mut hasher = Sha256::new();
    hasher.update(identity.as_bytes());
    hasher.update(b"_");
    hasher.update(direction.short().as_bytes());
    hex::encode(hasher.finalize())
}

/// Lazily creates traffic counters and keeps them for reuse.
///
/// Owned by the poll loop. Handles are never removed or relabeled.
pub struct MetricResolver {
    registry: Registry,
    host: String,
    handles: HashMap<String, Counter>,
}

impl MetricResolver {
    /// `host` is the value of every counter's `host` label.
    pub fn new(registry: Registry, host: impl Into<String>) -> Self {
        Self {
            registry,
            host: host.into(),
            handles: HashMap::new(),
        }
    }

    /// Return the counter for an entity's direction, registering it on first
    /// use.
    pub fn resolve(
        &mut self,
        category: Category,
        identity: &str,
        direction: Direction,
    ) -> Result<Counter, MetricsError> {
        let key = metric_key(identity, direction);
        if let Some(counter) = self.handles.get(&key) {
            return Ok(counter.clone());
        }

        let counter = Counter::with_opts(
            Opts::new(direction.short(), direction.short())
                .namespace(NAMESPACE)
                .subsystem(SUBSYSTEM)
                .const_label("type", category.as_str())
                .const_label("name", identity)
                .const_label("traffic", direction.short())
                .const_label("host", self.host.as_str()),
        )?;
        self.registry.register(Box::new(counter.clone()))?;
        debug!(%category, %identity, traffic = direction.short(), "registered traffic counter");

        self.handles.insert(key, counter.clone());
        Ok(counter)
    }

    /// Look up an already-created counter without creating one.
    pub fn get(&self, identity: &str, direction: Direction) -> Option<&Counter> {
        self.handles.get(&metric_key(identity, direction))
    }

    /// Number of counters created so far.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
