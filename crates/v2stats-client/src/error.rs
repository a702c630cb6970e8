//! Transport errors for stats queries.

use std::time::Duration;

use thiserror::Error;

/// Failure to obtain stat records from the backend.
///
/// Every variant is recoverable: the poll loop logs it and retries on the
/// next interval.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid backend address {addr}: {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("stats query failed: {0}")]
    Rpc(#[from] tonic::Status),

    #[error("stats query timed out after {0:?}")]
    Timeout(Duration),
}
