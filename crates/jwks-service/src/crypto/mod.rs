//! RSA private key parsing and JWK integer encoding.
//!
//! Key files hold a single PEM-armored RSA private key, either PKCS#1
//! (`RSA PRIVATE KEY`) or unencrypted PKCS#8 (`PRIVATE KEY`). Parsing is
//! all-or-nothing: a document either yields every component listed in
//! RFC 7518 Section 6.3 or is rejected with a [`KeyParseError`].
//!
//! # Security
//!
//! [`RsaKeyMaterial`] holds private key components. Its `Debug` output only
//! reveals the modulus size; key material must never reach the logs.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey};
use std::fmt;
use thiserror::Error;

/// PEM label of a PKCS#1 `RSAPrivateKey` document.
pub const PKCS1_PEM_LABEL: &str = "RSA PRIVATE KEY";

/// PEM label of an unencrypted PKCS#8 `PrivateKeyInfo` document.
pub const PKCS8_PEM_LABEL: &str = "PRIVATE KEY";

const BEGIN_MARKER: &str = "-----BEGIN ";
const END_MARKER: &str = "-----END ";
const MARKER_TAIL: &str = "-----";

/// Reasons a key file is skipped.
///
/// None of these abort a key set request; the offending file is logged and
/// left out of the response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("No PEM block found")]
    MissingPemBlock,

    #[error("Unsupported PEM label: {0}")]
    UnsupportedLabel(String),

    #[error("Malformed RSA private key: {0}")]
    Malformed(String),

    #[error("Incomplete RSA private key: {0}")]
    IncompleteKey(String),

    #[error("Key file could not be read: {0}")]
    Unreadable(String),
}

impl KeyParseError {
    /// Bounded label for the skipped-file metric.
    pub fn reason(&self) -> &'static str {
        match self {
            KeyParseError::MissingPemBlock => "missing_pem",
            KeyParseError::UnsupportedLabel(_) => "unsupported_label",
            KeyParseError::Malformed(_) => "malformed",
            KeyParseError::IncompleteKey(_) => "incomplete",
            KeyParseError::Unreadable(_) => "unreadable",
        }
    }
}

/// The eight integers of a two-prime RSA private key.
///
/// Fields are private so a value can only come from a successful parse (or
/// from tests inside this crate); accessors are named after the JWK members.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaKeyMaterial {
    modulus: BigUint,
    public_exponent: BigUint,
    private_exponent: BigUint,
    prime1: BigUint,
    prime2: BigUint,
    exponent1: BigUint,
    exponent2: BigUint,
    coefficient: BigUint,
}

impl RsaKeyMaterial {
    /// Extract all components from a decoded key.
    ///
    /// Multi-prime keys and keys whose CRT values cannot be derived are
    /// rejected so the all-or-nothing invariant holds.
    pub fn from_private_key(key: &RsaPrivateKey) -> Result<Self, KeyParseError> {
        let [prime1, prime2] = key.primes() else {
            return Err(KeyParseError::IncompleteKey(format!(
                "expected 2 primes, found {}",
                key.primes().len()
            )));
        };

        let exponent1 = key
            .dp()
            .cloned()
            .ok_or_else(|| KeyParseError::IncompleteKey("missing first CRT exponent".to_string()))?;
        let exponent2 = key
            .dq()
            .cloned()
            .ok_or_else(|| KeyParseError::IncompleteKey("missing second CRT exponent".to_string()))?;
        let coefficient = key
            .crt_coefficient()
            .ok_or_else(|| KeyParseError::IncompleteKey("missing CRT coefficient".to_string()))?;

        Ok(Self {
            modulus: key.n().clone(),
            public_exponent: key.e().clone(),
            private_exponent: key.d().clone(),
            prime1: prime1.clone(),
            prime2: prime2.clone(),
            exponent1,
            exponent2,
            coefficient,
        })
    }

    pub fn n(&self) -> &BigUint {
        &self.modulus
    }

    pub fn e(&self) -> &BigUint {
        &self.public_exponent
    }

    pub fn d(&self) -> &BigUint {
        &self.private_exponent
    }

    pub fn p(&self) -> &BigUint {
        &self.prime1
    }

    pub fn q(&self) -> &BigUint {
        &self.prime2
    }

    pub fn dp(&self) -> &BigUint {
        &self.exponent1
    }

    pub fn dq(&self) -> &BigUint {
        &self.exponent2
    }

    /// CRT coefficient `q^-1 mod p`.
    pub fn qi(&self) -> &BigUint {
        &self.coefficient
    }
}

/// Redacts everything but the modulus size.
impl fmt::Debug for RsaKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeyMaterial")
            .field("modulus_bits", &self.modulus.bits())
            .field("components", &"[REDACTED]")
            .finish()
    }
}

/// One armored object located inside a larger text.
struct PemBlock<'a> {
    label: &'a str,
    armored: &'a str,
}

impl<'a> PemBlock<'a> {
    /// Find the first `-----BEGIN <label>-----` ... `-----END <label>-----`
    /// span. Text before and after the span is ignored.
    fn find(text: &'a str) -> Option<Self> {
        let start = text.find(BEGIN_MARKER)?;
        let rest = text.get(start..)?;

        let label_start = BEGIN_MARKER.len();
        let label_len = rest.get(label_start..)?.find(MARKER_TAIL)?;
        let label = rest.get(label_start..label_start + label_len)?;
        if label.contains(['\r', '\n']) {
            return None;
        }

        let end_line = format!("{END_MARKER}{label}{MARKER_TAIL}");
        let end = rest.find(&end_line)? + end_line.len();

        Some(Self {
            label,
            armored: rest.get(..end)?,
        })
    }
}

/// Parse PEM text into RSA key material.
///
/// Accepts PKCS#1 and unencrypted PKCS#8 RSA private keys. Public keys,
/// certificates, encrypted keys and non-RSA keys are rejected.
pub fn parse_rsa_private_key_pem(text: &str) -> Result<RsaKeyMaterial, KeyParseError> {
    let block = PemBlock::find(text).ok_or(KeyParseError::MissingPemBlock)?;

    let key = match block.label {
        PKCS1_PEM_LABEL => RsaPrivateKey::from_pkcs1_pem(block.armored)
            .map_err(|e| KeyParseError::Malformed(e.to_string()))?,
        PKCS8_PEM_LABEL => RsaPrivateKey::from_pkcs8_pem(block.armored)
            .map_err(|e| KeyParseError::Malformed(e.to_string()))?,
        other => return Err(KeyParseError::UnsupportedLabel(other.to_string())),
    };

    RsaKeyMaterial::from_private_key(&key)
}

/// Base64url (no padding) of the minimal unsigned big-endian bytes.
///
/// No sign byte is prepended, per RFC 7518 Section 2 ("Base64urlUInt").
pub fn encode_unsigned_be(value: &BigUint) -> String {
    URL_SAFE_NO_PAD.encode(value.to_bytes_be())
}
