//! Integration tests for the operational endpoints

use jwks_test_utils::*;
use reqwest::StatusCode;

// ============================================================================
// Liveness Probe Tests
// ============================================================================

/// /health answers 200 OK even when the key directory is missing.
#[tokio::test]
async fn test_health_endpoint_returns_ok() -> Result<(), anyhow::Error> {
    // Arrange
    let keys = TestKeyDir::new();
    let server = TestJwksServer::spawn(keys.missing_path()).await?;

    // Act
    let response = reqwest::get(format!("{}/health", server.url())).await?;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, "OK");

    Ok(())
}

// ============================================================================
// Metrics Tests
// ============================================================================

/// /metrics exposes the key set counters after a request.
#[tokio::test]
async fn test_metrics_endpoint_reports_requests() -> Result<(), anyhow::Error> {
    // Arrange
    let keys = TestKeyDir::new()
        .with_file("key.pem", RSA_KEY_B_PKCS1_PEM)
        .with_file("notes.pem", NOT_A_PEM);
    let server = TestJwksServer::spawn(keys.path()).await?;

    // Act
    let response = reqwest::get(server.jwks_url()).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let metrics = reqwest::get(format!("{}/metrics", server.url())).await?;

    // Assert
    assert_eq!(metrics.status(), StatusCode::OK);
    let body = metrics.text().await?;
    assert!(
        body.contains("jwks_requests_total"),
        "Request counter missing from:\n{body}"
    );
    assert!(body.contains("jwks_key_files_skipped_total"));
    assert!(!body.contains(RSA_KEY_B_COMPONENTS.n), "Key material must not be exported");

    Ok(())
}
