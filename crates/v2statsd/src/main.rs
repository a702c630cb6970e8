//! v2statsd — V2Ray traffic exporter.
//!
//! Polls V2Ray's stats service, turns its cumulative counters into
//! per-interval increments, and serves them to Prometheus:
//! - Poller (background task, owns all traffic state)
//! - HTTP server (landing page + scrape endpoint)
//!
//! # Usage
//!
//! ```text
//! v2statsd --web.listen-address :9333 --v2ray.server-ip 127.0.0.1 --v2ray.server-port 10085
//! ```

mod cli;

use clap::Parser;
use prometheus::Registry;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

use v2stats_client::V2RayStatsClient;
use v2stats_metrics::{ExporterMetrics, MetricResolver};
use v2stats_poller::Poller;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = cli.load_config()?;
    let interval = config.poll_interval()?;
    let timeout = config.rpc_timeout()?;

    info!(
        backend = %config.backend_addr(),
        interval = ?interval,
        timeout = ?timeout,
        "v2statsd starting"
    );

    // ── Metrics ────────────────────────────────────────────────

    let registry = Registry::new();
    let exporter_metrics = ExporterMetrics::register(&registry)?;
    let host = v2stats_metrics::host_label(config.server_port);
    let resolver = MetricResolver::new(registry.clone(), host.as_str());
    info!(%host, "metric resolver initialized");

    // ── Poller ─────────────────────────────────────────────────

    let client = V2RayStatsClient::new(config.backend_addr(), timeout);
    let poller = Poller::new(client, resolver, exporter_metrics, interval);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller_handle = tokio::spawn(poller.run(shutdown_rx));

    // ── HTTP server ────────────────────────────────────────────

    let router = v2stats_api::build_router(registry, &config.metrics_path);
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, path = %config.metrics_path, "serving metrics");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            info!("shutdown signal received");
            let _ = shutdown_tx.send(true);
        })
        .await?;

    let _ = poller_handle.await;

    info!("v2statsd stopped");
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,v2statsd=debug,v2stats=debug"));

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
