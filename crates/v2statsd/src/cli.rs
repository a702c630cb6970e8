//! Command-line flags.
//!
//! Flag names follow the exporter's historical spelling
//! (`--web.listen-address`, `--v2ray.server-ip`, ...). Every flag is
//! optional; an explicit flag overrides the config file, which overrides
//! the built-in defaults.

use std::path::PathBuf;

use clap::Parser;

use v2stats_core::{ConfigError, ExporterConfig};

#[derive(Debug, Parser)]
#[command(name = "v2statsd", about = "V2Ray traffic exporter for Prometheus")]
pub struct Cli {
    /// TOML config file; flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Address on which to expose metrics and web interface.
    #[arg(long = "web.listen-address")]
    pub listen_address: Option<String>,

    /// Path under which to expose metrics.
    #[arg(long = "web.telemetry-path")]
    pub metrics_path: Option<String>,

    /// V2Ray API server ip.
    #[arg(long = "v2ray.server-ip")]
    pub server_ip: Option<String>,

    /// V2Ray API server port.
    #[arg(long = "v2ray.server-port")]
    pub server_port: Option<u16>,

    /// Seconds between polls.
    #[arg(long)]
    pub poll_interval: Option<u64>,

    /// Connect and query timeout in milliseconds.
    #[arg(long)]
    pub rpc_timeout: Option<u64>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Resolve the effective configuration and validate it.
    pub fn load_config(&self) -> Result<ExporterConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => ExporterConfig::from_file(path)?,
            None => ExporterConfig::default(),
        };
        let config = self.apply(base);
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, mut config: ExporterConfig) -> ExporterConfig {
        if let Some(v) = &self.listen_address {
            config.listen_address = v.clone();
        }
        if let Some(v) = &self.metrics_path {
            config.metrics_path = v.clone();
        }
        if let Some(v) = &self.server_ip {
            config.server_ip = v.clone();
        }
        if let Some(v) = self.server_port {
            config.server_port = v;
        }
        if let Some(v) = self.poll_interval {
            config.poll_interval = format!("{v}s");
        }
        if let Some(v) = self.rpc_timeout {
            config.rpc_timeout = format!("{v}ms");
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn no_flags_gives_defaults() {
        let cli = Cli::parse_from(["v2statsd"]);
        let config = cli.load_config().unwrap();
        assert_eq!(config, ExporterConfig::default());
    }

    #[test]
    fn dotted_flags_override() {
        let cli = Cli::parse_from([
            "v2statsd",
            "--web.listen-address",
            "127.0.0.1:9100",
            "--v2ray.server-ip",
            "10.1.1.1",
            "--v2ray.server-port",
            "8080",
            "--poll-interval",
            "30",
            "--rpc-timeout",
            "250",
        ]);
        let config = cli.load_config().unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:9100");
        assert_eq!(config.backend_addr(), "10.1.1.1:8080");
        assert_eq!(config.poll_interval().unwrap(), Duration::from_secs(30));
        assert_eq!(config.rpc_timeout().unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn invalid_flag_values_are_rejected() {
        let cli = Cli::parse_from(["v2statsd", "--poll-interval", "0"]);
        assert!(cli.load_config().is_err());

        let cli = Cli::parse_from(["v2statsd", "--web.telemetry-path", "metrics"]);
        assert!(cli.load_config().is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::parse_from(["v2statsd", "--config", "/nonexistent/v2statsd.toml"]);
        assert!(matches!(cli.load_config(), Err(ConfigError::Read(_))));
    }
}
