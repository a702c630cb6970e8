//! v2stats-api — HTTP surface of the exporter.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/` | Landing page linking to the metrics path |
//! | GET | `<metrics_path>` (default `/metrics`) | Prometheus exposition |

pub mod handlers;

use axum::Router;
use axum::routing::get;
use prometheus::Registry;

/// Shared state for handlers.
#[derive(Clone)]
pub struct ApiState {
    pub registry: Registry,
    pub metrics_path: String,
}

/// Build the router serving the landing page and the scrape endpoint.
pub fn build_router(registry: Registry, metrics_path: &str) -> Router {
    let state = ApiState {
        registry,
        metrics_path: metrics_path.to_string(),
    };

    Router::new()
        .route("/", get(handlers::landing_page))
        .route(metrics_path, get(handlers::prometheus_metrics))
        .with_state(state)
}
