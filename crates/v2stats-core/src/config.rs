//! Exporter configuration.
//!
//! Loaded once at startup, either from defaults or from a TOML file, and
//! then overridden by command-line flags. Never mutated afterwards.
//!
//! ```toml
//! listen_address = ":9333"
//! metrics_path = "/metrics"
//! server_ip = "127.0.0.1"
//! server_port = 10085
//! poll_interval = "5s"
//! rpc_timeout = "1s"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_LISTEN_ADDRESS: &str = ":9333";
pub const DEFAULT_METRICS_PATH: &str = "/metrics";
pub const DEFAULT_SERVER_IP: &str = "127.0.0.1";
pub const DEFAULT_SERVER_PORT: u16 = 10085;
pub const DEFAULT_POLL_INTERVAL: &str = "5s";
pub const DEFAULT_RPC_TIMEOUT: &str = "1s";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExporterConfig {
    /// Address the metrics page is served on. `:port` means all interfaces.
    pub listen_address: String,
    /// Path of the Prometheus exposition endpoint.
    pub metrics_path: String,
    /// V2Ray API host.
    pub server_ip: String,
    /// V2Ray API port. Also part of the `host` metric label.
    pub server_port: u16,
    /// Delay between poll cycles.
    pub poll_interval: String,
    /// Bound on connecting to and querying the stats service.
    pub rpc_timeout: String,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
            metrics_path: DEFAULT_METRICS_PATH.to_string(),
            server_ip: DEFAULT_SERVER_IP.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            poll_interval: DEFAULT_POLL_INTERVAL.to_string(),
            rpc_timeout: DEFAULT_RPC_TIMEOUT.to_string(),
        }
    }
}

impl ExporterConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reject values the exporter cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_port == 0 {
            return Err(ConfigError::Invalid("server_port must be non-zero".to_string()));
        }
        if self.server_ip.trim().is_empty() {
            return Err(ConfigError::Invalid("server_ip must not be empty".to_string()));
        }
        if !self.metrics_path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "metrics_path must start with '/': {}",
                self.metrics_path
            )));
        }
        if self.metrics_path == "/" {
            return Err(ConfigError::Invalid(
                "metrics_path must not be the landing page '/'".to_string(),
            ));
        }
        if self.poll_interval()?.is_zero() {
            return Err(ConfigError::Invalid("poll_interval must be non-zero".to_string()));
        }
        if self.rpc_timeout()?.is_zero() {
            return Err(ConfigError::Invalid("rpc_timeout must be non-zero".to_string()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.poll_interval)
            .ok_or_else(|| ConfigError::Duration(self.poll_interval.clone()))
    }

    pub fn rpc_timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.rpc_timeout)
            .ok_or_else(|| ConfigError::Duration(self.rpc_timeout.clone()))
    }

    /// `ip:port` of the stats service.
    pub fn backend_addr(&self) -> String {
        format!("{}:{}", self.server_ip, self.server_port)
    }

    /// Listen address with a bare `:port` expanded to all interfaces.
    pub fn bind_address(&self) -> String {
        if self.listen_address.starts_with(':') {
            format!("0.0.0.0{}", self.listen_address)
        } else {
            self.listen_address.clone()
        }
    }
}

/// Parse `"5s"`, `"500ms"`, `"2m"`, or a plain number of seconds.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(secs) = s.strip_suffix('s') {
        if let Some(ms) = secs.strip_suffix('m') {
            ms.parse::<u64>().ok().map(Duration::from_millis)
        } else {
            secs.parse::<u64>().ok().map(Duration::from_secs)
        }
    } else if let Some(mins) = s.strip_suffix('m') {
        mins.parse::<u64>()
            .ok()
            .and_then(|m| m.checked_mul(60))
            .map(Duration::from_secs)
    } else {
        s.parse::<u64>().ok().map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_flags() {
        let config = ExporterConfig::default();
        assert_eq!(config.listen_address, ":9333");
        assert_eq!(config.backend_addr(), "127.0.0.1:10085");
        assert_eq!(config.poll_interval().unwrap(), Duration::from_secs(5));
        assert_eq!(config.rpc_timeout().unwrap(), Duration::from_secs(1));
        config.validate().unwrap();
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ExporterConfig::from_toml_str(
            r#"
            server_ip = "10.0.0.7"
            poll_interval = "15s"
            "#,
        )
        .unwrap();
        assert_eq!(config.server_ip, "10.0.0.7");
        assert_eq!(config.server_port, 10085);
        assert_eq!(config.poll_interval().unwrap(), Duration::from_secs(15));
        assert_eq!(config.metrics_path, "/metrics");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let err = ExporterConfig::from_toml_str("server_port = \"ten\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bind_address_expands_bare_port() {
        let mut config = ExporterConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:9333");

        config.listen_address = "127.0.0.1:9100".to_string();
        assert_eq!(config.bind_address(), "127.0.0.1:9100");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad = [
            ExporterConfig {
                server_port: 0,
                ..Default::default()
            },
            ExporterConfig {
                metrics_path: "metrics".to_string(),
                ..Default::default()
            },
            ExporterConfig {
                metrics_path: "/".to_string(),
                ..Default::default()
            },
            ExporterConfig {
                poll_interval: "0s".to_string(),
                ..Default::default()
            },
            ExporterConfig {
                rpc_timeout: "soon".to_string(),
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?} should be rejected");
        }
    }

    #[test]
    fn parse_duration_forms() {
        assert_eq!(parse_duration("5s"), Some(Duration::from_secs(5)));
        assert_eq!(parse_duration("500ms"), Some(Duration::from_millis(500)));
        assert_eq!(parse_duration("2m"), Some(Duration::from_secs(120)));
        assert_eq!(parse_duration("10"), Some(Duration::from_secs(10)));
        assert_eq!(parse_duration("fast"), None);
    }

    #[test]
    fn parse_duration_rejects_overflowing_minutes() {
        assert_eq!(parse_duration("999999999999999999m"), None);

        let config = ExporterConfig {
            poll_interval: "999999999999999999m".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Duration(_))));
    }
}
