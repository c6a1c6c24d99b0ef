//! Observability for the JWKS service.
//!
//! Logging goes through `tracing`; handlers and service entry points use
//! `#[instrument(skip_all)]` and only record counts and statuses. Key
//! material and file contents are never logged; skipped files are identified
//! by file name only.

pub mod metrics;

pub use metrics::{
    init_metrics_recorder, record_jwks_request, record_key_file_skipped, set_key_set_size,
};
