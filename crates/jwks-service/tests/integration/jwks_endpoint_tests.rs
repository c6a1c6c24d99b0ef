//! Integration tests for GET /api/EPICJWK/jwks.json
//!
//! Each test spawns a real server over its own temporary key directory and
//! talks to it over HTTP.

use jwks_service::config::{Config, KidStrategy};
use jwks_test_utils::*;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashMap;

async fn fetch_keys(server: &TestJwksServer) -> Result<Vec<Value>, anyhow::Error> {
    let response = reqwest::get(server.jwks_url()).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await?;
    let keys = body
        .get("keys")
        .and_then(Value::as_array)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("response has no keys array: {body}"))?;
    Ok(keys)
}

// ============================================================================
// Key Set Contents
// ============================================================================

/// An empty directory serves an empty key set.
#[tokio::test]
async fn test_empty_directory_serves_empty_key_set() -> Result<(), anyhow::Error> {
    let keys = TestKeyDir::new();
    let server = TestJwksServer::spawn(keys.path()).await?;

    let response = reqwest::get(server.jwks_url()).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await?;
    assert_eq!(body, serde_json::json!({ "keys": [] }));

    Ok(())
}

/// One key file yields one complete RSA private JWK.
#[tokio::test]
async fn test_single_key_served_with_all_members() -> Result<(), anyhow::Error> {
    let keys = TestKeyDir::new().with_file("signing.pem", RSA_KEY_B_PKCS1_PEM);
    let server = TestJwksServer::spawn(keys.path()).await?;

    let served = fetch_keys(&server).await?;

    assert_eq!(served.len(), 1);
    let key = &served[0];
    key.assert_rsa_private_jwk()
        .assert_member("n", RSA_KEY_B_COMPONENTS.n)
        .assert_member("e", RSA_KEY_B_COMPONENTS.e)
        .assert_member("d", RSA_KEY_B_COMPONENTS.d)
        .assert_member("p", RSA_KEY_B_COMPONENTS.p)
        .assert_member("q", RSA_KEY_B_COMPONENTS.q)
        .assert_member("dp", RSA_KEY_B_COMPONENTS.dp)
        .assert_member("dq", RSA_KEY_B_COMPONENTS.dq)
        .assert_member("qi", RSA_KEY_B_COMPONENTS.qi);

    Ok(())
}

/// The same key stored in two files is served once.
#[tokio::test]
async fn test_duplicate_key_files_merged() -> Result<(), anyhow::Error> {
    let keys = TestKeyDir::new()
        .with_file("current.pem", RSA_KEY_A_PKCS1_PEM)
        .with_file("current-pkcs8.pem", RSA_KEY_A_PKCS8_PEM)
        .with_file("previous.pem", RSA_KEY_B_PKCS1_PEM);
    let server = TestJwksServer::spawn(keys.path()).await?;

    let served = fetch_keys(&server).await?;

    assert_eq!(served.len(), 2);
    for key in &served {
        key.assert_rsa_private_jwk();
    }
    assert_ne!(served[0]["n"], served[1]["n"]);

    Ok(())
}

/// Files that are not RSA private keys are skipped without failing the request.
#[tokio::test]
async fn test_unusable_files_skipped() -> Result<(), anyhow::Error> {
    let keys = TestKeyDir::new()
        .with_file("a-notes.pem", NOT_A_PEM)
        .with_file("b-public.pem", RSA_KEY_A_PUBLIC_PEM)
        .with_file("c-ed25519.pem", ED25519_PKCS8_PEM)
        .with_file("d-binary.pem", [0xffu8, 0xfe, 0x00])
        .with_file("e-signing.pem", RSA_KEY_B_PKCS1_PEM)
        .with_file("f-readme.txt", RSA_KEY_A_PKCS1_PEM);
    let server = TestJwksServer::spawn(keys.path()).await?;

    let served = fetch_keys(&server).await?;

    assert_eq!(served.len(), 1);
    served[0].assert_member("n", RSA_KEY_B_COMPONENTS.n);

    Ok(())
}

/// Non-UTF-8 text outside the PEM armor does not hide the key.
#[tokio::test]
async fn test_key_with_latin1_header_served() -> Result<(), anyhow::Error> {
    let mut contents = b"# owner: Jos\xe9\n".to_vec();
    contents.extend_from_slice(RSA_KEY_B_PKCS1_PEM.as_bytes());
    let keys = TestKeyDir::new().with_file("annotated.pem", contents);
    let server = TestJwksServer::spawn(keys.path()).await?;

    let served = fetch_keys(&server).await?;

    assert_eq!(served.len(), 1);
    served[0]
        .assert_rsa_private_jwk()
        .assert_member("n", RSA_KEY_B_COMPONENTS.n);

    Ok(())
}

/// The lowercase path serves the same key set.
#[tokio::test]
async fn test_lowercase_path_served() -> Result<(), anyhow::Error> {
    let keys = TestKeyDir::new().with_file("key.pem", RSA_KEY_B_PKCS1_PEM);
    let server = TestJwksServer::spawn(keys.path()).await?;

    let response = reqwest::get(format!("{}/api/epicjwk/jwks.json", server.url())).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    body["keys"][0].assert_member("n", RSA_KEY_B_COMPONENTS.n);

    Ok(())
}

// ============================================================================
// Errors
// ============================================================================

/// A missing key directory is a plain-text 404 without key data or paths.
#[tokio::test]
async fn test_missing_directory_returns_404() -> Result<(), anyhow::Error> {
    let keys = TestKeyDir::new();
    let missing = keys.missing_path();
    let server = TestJwksServer::spawn(&missing).await?;

    let response = reqwest::get(server.jwks_url()).await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"), "got {content_type}");

    let body = response.text().await?;
    assert!(!body.trim().is_empty());
    assert!(!body.contains("\"keys\""));
    assert!(!body.contains(&*missing.to_string_lossy()));

    Ok(())
}

/// The directory is checked per request, so it may appear after startup.
#[tokio::test]
async fn test_directory_created_after_startup_is_served() -> Result<(), anyhow::Error> {
    let keys = TestKeyDir::new();
    let key_dir = keys.missing_path();
    let server = TestJwksServer::spawn(&key_dir).await?;

    let before = reqwest::get(server.jwks_url()).await?;
    assert_eq!(before.status(), StatusCode::NOT_FOUND);

    std::fs::create_dir(&key_dir)?;
    std::fs::write(key_dir.join("key.pem"), RSA_KEY_B_PKCS1_PEM)?;

    let served = fetch_keys(&server).await?;
    assert_eq!(served.len(), 1);

    Ok(())
}

// ============================================================================
// Per-request Behavior
// ============================================================================

/// Added and removed files are visible on the next request.
#[tokio::test]
async fn test_directory_rescanned_per_request() -> Result<(), anyhow::Error> {
    let keys = TestKeyDir::new().with_file("a.pem", RSA_KEY_A_PKCS1_PEM);
    let server = TestJwksServer::spawn(keys.path()).await?;

    assert_eq!(fetch_keys(&server).await?.len(), 1);

    keys.write("b.pem", RSA_KEY_B_PKCS1_PEM);
    assert_eq!(fetch_keys(&server).await?.len(), 2);

    keys.remove("a.pem");
    let served = fetch_keys(&server).await?;
    assert_eq!(served.len(), 1);
    served[0].assert_member("n", RSA_KEY_B_COMPONENTS.n);

    Ok(())
}

/// The key set is never cacheable and is served as JSON.
#[tokio::test]
async fn test_response_headers() -> Result<(), anyhow::Error> {
    let keys = TestKeyDir::new().with_file("key.pem", RSA_KEY_B_PKCS1_PEM);
    let server = TestJwksServer::spawn(keys.path()).await?;

    let response = reqwest::get(server.jwks_url()).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(CACHE_CONTROL).and_then(|v| v.to_str().ok()),
        Some("no-store")
    );
    assert_eq!(
        response.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/json")
    );

    Ok(())
}

/// Random kids change on every request.
#[tokio::test]
async fn test_random_kid_changes_per_request() -> Result<(), anyhow::Error> {
    let keys = TestKeyDir::new().with_file("key.pem", RSA_KEY_B_PKCS1_PEM);
    let server = TestJwksServer::spawn(keys.path()).await?;

    let first = fetch_keys(&server).await?;
    let second = fetch_keys(&server).await?;

    assert_ne!(first[0].kid(), second[0].kid());
    assert_eq!(first[0]["n"], second[0]["n"]);

    Ok(())
}

/// With JWKS_KID_STRATEGY=thumbprint the kid is the RFC 7638 thumbprint.
#[tokio::test]
async fn test_thumbprint_kid_is_stable() -> Result<(), anyhow::Error> {
    let keys = TestKeyDir::new().with_file("key.pem", RSA_KEY_B_PKCS1_PEM);
    let vars = HashMap::from([
        (
            "JWKS_KEY_DIR".to_string(),
            keys.path().to_string_lossy().into_owned(),
        ),
        ("JWKS_KID_STRATEGY".to_string(), "thumbprint".to_string()),
    ]);
    let config = Config::from_vars(&vars)?;
    assert_eq!(config.kid_strategy, KidStrategy::Thumbprint);
    let server = TestJwksServer::spawn_with_config(config).await?;

    let first = fetch_keys(&server).await?;
    let second = fetch_keys(&server).await?;

    assert_eq!(first[0].kid(), RSA_KEY_B_THUMBPRINT);
    assert_eq!(first, second);

    Ok(())
}

/// Only GET is routed.
#[tokio::test]
async fn test_post_not_allowed() -> Result<(), anyhow::Error> {
    let keys = TestKeyDir::new();
    let server = TestJwksServer::spawn(keys.path()).await?;

    let response = reqwest::Client::new()
        .post(server.jwks_url())
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    Ok(())
}
