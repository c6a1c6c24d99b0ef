//! # JWKS Test Utilities
//!
//! Shared test utilities for the JWKS service.
//!
//! This crate provides:
//! - Fixed PEM key fixtures with their expected JWK members
//! - Temporary key directories (TestKeyDir)
//! - Server test harness (TestJwksServer for E2E tests)
//! - Custom assertions (JwkAssertions trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jwks_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), anyhow::Error> {
//!     let keys = TestKeyDir::new().with_file("signing.pem", RSA_KEY_B_PKCS1_PEM);
//!     let server = TestJwksServer::spawn(keys.path()).await?;
//!
//!     let body: serde_json::Value = reqwest::get(server.jwks_url()).await?.json().await?;
//!     body["keys"][0].assert_rsa_private_jwk();
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod crypto_fixtures;
pub mod key_dir;
pub mod server_harness;

// Re-export commonly used items
pub use assertions::*;
pub use crypto_fixtures::*;
pub use key_dir::*;
pub use server_harness::*;
