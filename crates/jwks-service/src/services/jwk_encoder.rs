use crate::config::KidStrategy;
use crate::crypto::{encode_unsigned_be, RsaKeyMaterial};
use crate::models::JsonWebKey;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// `kty` of every key this service encodes.
pub const RSA_KEY_TYPE: &str = "RSA";

/// Encode RSA key material as a fully populated JWK.
///
/// Every numeric member is Base64urlUInt-encoded. The `kid` follows
/// `kid_strategy`; with [`KidStrategy::Random`] two encodings of the same key
/// never share a `kid`.
pub fn encode_jwk(key: &RsaKeyMaterial, kid_strategy: KidStrategy) -> JsonWebKey {
    let n = encode_unsigned_be(key.n());
    let e = encode_unsigned_be(key.e());

    let kid = match kid_strategy {
        KidStrategy::Random => Uuid::new_v4().to_string(),
        KidStrategy::Thumbprint => rsa_thumbprint(&n, &e),
    };

    JsonWebKey {
        kty: Some(RSA_KEY_TYPE.to_string()),
        d: Some(encode_unsigned_be(key.d())),
        p: Some(encode_unsigned_be(key.p())),
        q: Some(encode_unsigned_be(key.q())),
        dp: Some(encode_unsigned_be(key.dp())),
        dq: Some(encode_unsigned_be(key.dq())),
        qi: Some(encode_unsigned_be(key.qi())),
        kid: Some(kid),
        n: Some(n),
        e: Some(e),
    }
}

/// RFC 7638 JWK thumbprint of an RSA public key.
///
/// The hash input is the required members in lexicographic order with no
/// whitespace. Base64url values never need JSON escaping.
pub fn rsa_thumbprint(n: &str, e: &str) -> String {
    let canonical = format!(r#"{{"e":"{e}","kty":"{RSA_KEY_TYPE}","n":"{n}"}}"#);
    URL_SAFE_NO_PAD.encode(Sha256::digest(canonical.as_bytes()))
}
