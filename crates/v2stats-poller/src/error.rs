use thiserror::Error;

use v2stats_client::ClientError;
use v2stats_core::ParseError;

/// Why a poll cycle was abandoned.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("fetch failed: {0}")]
    Transport(#[from] ClientError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
