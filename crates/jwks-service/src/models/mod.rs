use serde::{Deserialize, Serialize};

/// JWKS response (RFC 7517 Section 5)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<JsonWebKey>,
}

/// RSA JSON Web Key (RFC 7517, RFC 7518 Section 6.3)
///
/// Every member is optional so partially populated records can be merged.
/// Absent members are omitted from the JSON rather than written as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonWebKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kty: Option<String>, // Key Type, always "RSA" when encoded here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>, // Modulus
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>, // Public exponent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>, // Private exponent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<String>, // First prime factor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>, // Second prime factor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>, // First factor CRT exponent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>, // Second factor CRT exponent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>, // First CRT coefficient
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>, // Key ID
}

impl JsonWebKey {
    /// Whether two records describe the same key.
    ///
    /// True when `n` and `e` are present on both sides and equal, or when
    /// `p` and `q` are present on both sides and equal. Absent members never
    /// match each other.
    pub fn same_key_as(&self, other: &JsonWebKey) -> bool {
        (both_equal(&self.n, &other.n) && both_equal(&self.e, &other.e))
            || (both_equal(&self.p, &other.p) && both_equal(&self.q, &other.q))
    }

    /// Copy every member that is absent here from `other`.
    ///
    /// Present members are never overwritten.
    pub fn fill_missing_from(&mut self, other: &JsonWebKey) {
        fill(&mut self.kty, &other.kty);
        fill(&mut self.n, &other.n);
        fill(&mut self.e, &other.e);
        fill(&mut self.d, &other.d);
        fill(&mut self.p, &other.p);
        fill(&mut self.q, &other.q);
        fill(&mut self.dp, &other.dp);
        fill(&mut self.dq, &other.dq);
        fill(&mut self.qi, &other.qi);
        fill(&mut self.kid, &other.kid);
    }
}

fn both_equal(left: &Option<String>, right: &Option<String>) -> bool {
    matches!((left, right), (Some(l), Some(r)) if l == r)
}

fn fill(slot: &mut Option<String>, value: &Option<String>) {
    if slot.is_none() {
        slot.clone_from(value);
    }
}
