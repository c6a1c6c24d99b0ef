//! HTTP routes for the JWKS service.
//!
//! Defines the Axum router and application state.

use crate::config::Config;
use crate::handlers;
use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Path of the key set endpoint.
pub const JWKS_PATH: &str = "/api/EPICJWK/jwks.json";

/// Lowercase spelling of [`JWKS_PATH`], served by the same handler.
pub const JWKS_PATH_LOWERCASE: &str = "/api/epicjwk/jwks.json";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: Config,
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/api/EPICJWK/jwks.json` - Merged key set, rescanned per request
/// - `/api/epicjwk/jwks.json` - Same endpoint, lowercase alias
/// - `/health` - Liveness probe (simple "OK")
/// - `/metrics` - Prometheus metrics endpoint
/// - TraceLayer for request logging
/// - Request timeout from `REQUEST_TIMEOUT_SECONDS`
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_seconds);

    let api_routes = Router::new()
        .route(JWKS_PATH, get(handlers::handle_get_jwks))
        .route(JWKS_PATH_LOWERCASE, get(handlers::handle_get_jwks))
        .route("/health", get(handlers::health_check))
        .with_state(state);

    // Metrics route with its own state
    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    api_routes
        .merge(metrics_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
}
