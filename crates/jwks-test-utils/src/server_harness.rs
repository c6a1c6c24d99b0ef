//! Test server harness for E2E testing
//!
//! Provides TestJwksServer for spawning real JWKS server instances in tests.

use jwks_service::config::Config;
use jwks_service::observability::init_metrics_recorder;
use jwks_service::routes::{self, AppState, JWKS_PATH};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tokio::task::JoinHandle;

/// Handle of the process-wide recorder, installed by the first server spawned.
static METRICS_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

fn metrics_handle() -> PrometheusHandle {
    let installed = METRICS_HANDLE.get_or_init(|| init_metrics_recorder().ok());
    match installed {
        Some(handle) => handle.clone(),
        // Another recorder owns the process; this server renders its own empty page
        None => PrometheusBuilder::new().build_recorder().handle(),
    }
}

/// Test harness for spawning the JWKS server in E2E tests
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_jwks_e2e() -> Result<()> {
///     let keys = TestKeyDir::new().with_file("a.pem", RSA_KEY_A_PKCS1_PEM);
///     let server = TestJwksServer::spawn(keys.path()).await?;
///
///     let response = reqwest::get(server.jwks_url()).await?;
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestJwksServer {
    addr: SocketAddr,
    config: Config,
    _handle: JoinHandle<()>,
}

impl TestJwksServer {
    /// Spawn a server serving `key_dir` with default settings.
    pub async fn spawn(key_dir: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let vars = HashMap::from([
            ("BIND_ADDRESS".to_string(), "127.0.0.1:0".to_string()),
            (
                "JWKS_KEY_DIR".to_string(),
                key_dir.as_ref().to_string_lossy().into_owned(),
            ),
        ]);
        let config = Config::from_vars(&vars)?;

        Self::spawn_with_config(config).await
    }

    /// Spawn a server with an explicit configuration.
    ///
    /// The server binds to a random available port regardless of
    /// `config.bind_address`.
    pub async fn spawn_with_config(config: Config) -> Result<Self, anyhow::Error> {
        let state = Arc::new(AppState {
            config: config.clone(),
        });

        // Build routes using jwks-service's real route builder
        let app = routes::build_routes(state, metrics_handle());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            config,
            _handle: handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Full URL of the key set endpoint
    pub fn jwks_url(&self) -> String {
        format!("{}{}", self.url(), JWKS_PATH)
    }

    /// Get reference to the server configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Drop for TestJwksServer {
    fn drop(&mut self) {
        self._handle.abort();
    }
}
