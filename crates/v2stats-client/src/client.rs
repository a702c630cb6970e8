//! Stats query client.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tonic::transport::Endpoint;
use tracing::debug;

use v2stats_core::StatRecord;

use crate::error::ClientError;
use crate::proto;
use crate::proto::stats_service_client::StatsServiceClient;

/// Boxed future returned by [`StatsSource::query_stats`].
pub type StatsFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<StatRecord>, ClientError>> + Send + 'a>>;

/// Anything that can list the backend's cumulative counters.
pub trait StatsSource: Send + Sync {
    /// Return all counters whose name matches `pattern` (empty matches
    /// everything). `reset = true` would zero the counters on the backend;
    /// the exporter never asks for that.
    fn query_stats<'a>(&'a self, pattern: &'a str, reset: bool) -> StatsFuture<'a>;
}

/// gRPC client for V2Ray's `StatsService`.
///
/// Each query dials a new channel, so a restarted backend is picked up
/// without any reconnect logic.
#[derive(Debug, Clone)]
pub struct V2RayStatsClient {
    addr: String,
    timeout: Duration,
}

impl V2RayStatsClient {
    /// `addr` is `host:port` of the V2Ray API inbound.
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout,
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch(&self, pattern: &str, reset: bool) -> Result<Vec<StatRecord>, ClientError> {
        let endpoint = Endpoint::from_shared(format!("http://{}", self.addr))
            .map_err(|source| ClientError::InvalidAddress {
                addr: self.addr.clone(),
                source,
            })?
            .connect_timeout(self.timeout)
            .timeout(self.timeout);

        let channel = tokio::time::timeout(self.timeout, endpoint.connect())
            .await
            .map_err(|_| ClientError::Timeout(self.timeout))?
            .map_err(|source| ClientError::Connect {
                addr: self.addr.clone(),
                source,
            })?;

        let mut client = StatsServiceClient::new(channel);
        let request = proto::QueryStatsRequest {
            pattern: pattern.to_string(),
            reset,
        };

        let response = tokio::time::timeout(self.timeout, client.query_stats(request))
            .await
            .map_err(|_| ClientError::Timeout(self.timeout))??;

        let stats = response.into_inner().stat;
        debug!(addr = %self.addr, records = stats.len(), "stats queried");

        Ok(stats
            .into_iter()
            .map(|s| StatRecord::new(s.name, s.value))
            .collect())
    }
}

impl StatsSource for V2RayStatsClient {
    fn query_stats<'a>(&'a self, pattern: &'a str, reset: bool) -> StatsFuture<'a> {
        Box::pin(self.fetch(pattern, reset))
    }
}
