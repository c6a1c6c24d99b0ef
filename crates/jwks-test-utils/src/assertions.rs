//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions over JWK JSON as received by clients.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::Value;

/// Members every RSA private JWK served by the service carries.
pub const RSA_PRIVATE_MEMBERS: [&str; 10] =
    ["kty", "n", "e", "d", "p", "q", "dp", "dq", "qi", "kid"];

/// Members holding Base64urlUInt values.
const NUMERIC_MEMBERS: [&str; 8] = ["n", "e", "d", "p", "q", "dp", "dq", "qi"];

/// Custom assertions for JWK JSON objects
///
/// # Example
/// ```rust,ignore
/// body["keys"][0]
///     .assert_rsa_private_jwk()
///     .assert_member("e", "AQAB");
/// ```
pub trait JwkAssertions {
    /// Assert that the value is a complete RSA private JWK with well-formed members
    fn assert_rsa_private_jwk(&self) -> &Self;

    /// Assert that the member is present with the given string value
    fn assert_member(&self, name: &str, expected: &str) -> &Self;

    /// Assert that no member is present with a JSON `null` value
    fn assert_no_null_members(&self) -> &Self;

    /// Get the `kid` member, failing the test if absent
    fn kid(&self) -> String;
}

impl JwkAssertions for Value {
    fn assert_rsa_private_jwk(&self) -> &Self {
        let object = self
            .as_object()
            .unwrap_or_else(|| panic!("JWK must be a JSON object, got {self}"));

        for name in RSA_PRIVATE_MEMBERS {
            let value = object.get(name);
            assert!(
                value.is_some_and(Value::is_string),
                "JWK member '{name}' must be a string, got {value:?}"
            );
        }

        assert_eq!(object.get("kty").and_then(Value::as_str), Some("RSA"));

        for name in NUMERIC_MEMBERS {
            let encoded = object.get(name).and_then(Value::as_str).unwrap_or_default();
            assert_base64url_uint(name, encoded);
        }

        self.assert_no_null_members()
    }

    fn assert_member(&self, name: &str, expected: &str) -> &Self {
        assert_eq!(
            self.get(name).and_then(Value::as_str),
            Some(expected),
            "JWK member '{name}' mismatch"
        );
        self
    }

    fn assert_no_null_members(&self) -> &Self {
        if let Some(object) = self.as_object() {
            for (name, value) in object {
                assert!(!value.is_null(), "JWK member '{name}' must be omitted, not null");
            }
        }
        self
    }

    fn kid(&self) -> String {
        self.get("kid")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| panic!("JWK has no kid: {self}"))
    }
}

fn assert_base64url_uint(name: &str, encoded: &str) {
    assert!(!encoded.is_empty(), "JWK member '{name}' must not be empty");
    assert!(
        !encoded.contains('='),
        "JWK member '{name}' must not be padded: {encoded}"
    );

    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .unwrap_or_else(|e| panic!("JWK member '{name}' is not base64url: {e}"));

    // Minimal big-endian form: no leading zero octet
    assert_ne!(
        bytes.first(),
        Some(&0u8),
        "JWK member '{name}' has a leading zero octet"
    );
}
