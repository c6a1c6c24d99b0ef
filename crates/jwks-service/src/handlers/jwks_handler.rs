use crate::errors::JwksError;
use crate::models::Jwks;
use crate::observability::record_jwks_request;
use crate::routes::AppState;
use crate::services::key_set_service;
use axum::{
    extract::State,
    http::header::{HeaderMap, HeaderValue, CACHE_CONTROL},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, instrument, warn};

/// Handle key set request
///
/// GET /api/EPICJWK/jwks.json
///
/// Rescans the key directory on every call and returns the merged key set.
/// The response carries `Cache-Control: no-store` because it contains private
/// key members and, with random `kid`s, differs on every call.
#[instrument(name = "jwks.key_set.get", skip_all, fields(status))]
pub async fn handle_get_jwks(
    State(state): State<Arc<AppState>>,
) -> Result<(HeaderMap, Json<Jwks>), JwksError> {
    let start = Instant::now();

    let result =
        key_set_service::load_key_set(&state.config.key_dir, state.config.kid_strategy).await;

    let status = match &result {
        Ok(_) => "success",
        Err(e) if e.status_code() == StatusCode::NOT_FOUND => {
            warn!(error = %e, "Key directory missing");
            "not_found"
        }
        Err(e) => {
            error!(error = %e, "Key set load failed");
            "error"
        }
    };
    tracing::Span::current().record("status", status);
    record_jwks_request(status, start.elapsed());

    let jwks = result?;

    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));

    Ok((headers, Json(jwks)))
}
