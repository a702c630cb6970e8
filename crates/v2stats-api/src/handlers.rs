//! HTTP handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{Html, IntoResponse};
use tracing::error;

use crate::ApiState;

/// GET /
pub async fn landing_page(State(state): State<ApiState>) -> Html<String> {
    Html(format!(
        "<html>\n\
         <head><title>V2Ray Exporter</title></head>\n\
         <body>\n\
         <h1>V2Ray Exporter</h1>\n\
         <p><a href=\"{}\">Metrics</a></p>\n\
         </body>\n\
         </html>\n",
        state.metrics_path
    ))
}

/// GET /metrics
pub async fn prometheus_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    match v2stats_metrics::render(&state.registry) {
        Ok(body) => (
            StatusCode::OK,
            [(CONTENT_TYPE, v2stats_metrics::CONTENT_TYPE)],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
