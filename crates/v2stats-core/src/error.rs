//! Error types for stat name parsing and exporter configuration.

use thiserror::Error;

/// Errors raised while decoding a stat record name.
///
/// Both variants abort the poll cycle that produced the record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unrecognized name: {name} (expected 4 `>>>` segments, got {segments})")]
    MalformedName { name: String, segments: usize },

    #[error("unrecognized name: {name} (unknown category {category:?})")]
    UnknownCategory { name: String, category: String },
}

/// Errors raised while loading or validating the exporter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid duration: {0}")]
    Duration(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}
