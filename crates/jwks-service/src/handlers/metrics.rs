//! Prometheus metrics endpoint handler.
//!
//! Labels are bounded status and skip-reason values only; no key material or
//! file names are exported.

use axum::{extract::State, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

/// Handler for GET /metrics
///
/// Returns Prometheus-formatted metrics for scraping.
///
/// # Response
///
/// ```text
/// # TYPE jwks_requests_total counter
/// jwks_requests_total{status="success"} 42
/// ```
#[tracing::instrument(skip_all, name = "jwks.metrics.scrape")]
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    handle.render()
}
