use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("metric registration failed: {0}")]
    Register(#[from] prometheus::Error),

    #[error("metric encoding failed: {0}")]
    Encode(String),
}
