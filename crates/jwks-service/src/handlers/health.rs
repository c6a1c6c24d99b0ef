/// Liveness probe handler.
///
/// Returns "OK" while the process is serving. Does not touch the key
/// directory; a missing directory shows up on the key set endpoint instead.
pub async fn health_check() -> &'static str {
    "OK"
}
