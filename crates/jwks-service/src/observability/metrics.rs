//! Metrics definitions for the JWKS service
//!
//! All metrics follow Prometheus naming conventions:
//! - `jwks_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded:
//! - `status`: 3 values (success, not_found, error)
//! - `reason`: 5 values, see [`crate::crypto::KeyParseError::reason`]

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Install the Prometheus recorder and return the handle for `/metrics`.
///
/// # Errors
///
/// Returns error if the recorder fails to install (e.g., already installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        // Directory scans are local disk reads; most finish well under 50ms
        .set_buckets_for_metric(
            Matcher::Full("jwks_request_duration_seconds".to_string()),
            &[
                0.001, 0.002, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.000,
            ],
        )
        .map_err(|e| format!("Failed to set JWKS request buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

/// Record a key set request
///
/// Metric: `jwks_requests_total`, `jwks_request_duration_seconds`
/// Labels: `status`
pub fn record_jwks_request(status: &str, duration: Duration) {
    histogram!("jwks_request_duration_seconds", "status" => status.to_string())
        .record(duration.as_secs_f64());

    counter!("jwks_requests_total", "status" => status.to_string()).increment(1);
}

/// Record a key file left out of the key set
///
/// Metric: `jwks_key_files_skipped_total`
/// Labels: `reason`
pub fn record_key_file_skipped(reason: &str) {
    counter!("jwks_key_files_skipped_total", "reason" => reason.to_string()).increment(1);
}

/// Number of distinct keys in the last served key set
///
/// Metric: `jwks_keys`
pub fn set_key_set_size(count: usize) {
    gauge!("jwks_keys").set(count as f64);
}
