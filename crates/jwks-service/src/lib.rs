//! JWKS Service Library
//!
//! Serves the RSA private keys found in a key directory as a JSON Web Key Set
//! (RFC 7517). The directory is rescanned on every request; keys stored in
//! more than one file are merged into a single entry.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `crypto` - PEM parsing and Base64urlUInt encoding
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `models` - JWK and JWKS data models
//! - `observability` - Metrics
//! - `repositories` - Key directory access
//! - `routes` - Router and application state
//! - `services` - Encoding, merging and key set assembly

pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod services;
