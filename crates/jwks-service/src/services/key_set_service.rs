use crate::config::KidStrategy;
use crate::crypto::{parse_rsa_private_key_pem, KeyParseError};
use crate::errors::JwksError;
use crate::models::{JsonWebKey, Jwks};
use crate::observability::{record_key_file_skipped, set_key_set_size};
use crate::repositories::key_files;
use crate::services::jwk_encoder::encode_jwk;
use crate::services::key_merge::{KeyMerger, MergeOutcome};
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Wrap the merged keys in the response envelope.
pub fn assemble_key_set(merger: KeyMerger) -> Jwks {
    Jwks {
        keys: merger.into_keys(),
    }
}

/// Scan `key_dir` and build the key set from its `*.pem` files.
///
/// Files are processed in path order. A file that cannot be read or does not
/// hold an RSA private key is logged and left out; it never fails the
/// request. Only a missing or unreadable directory is an error.
#[instrument(name = "jwks.key_set.load", skip_all, fields(key_count, skipped))]
pub async fn load_key_set(key_dir: &Path, kid_strategy: KidStrategy) -> Result<Jwks, JwksError> {
    let files = key_files::list_pem_files(key_dir).await?;

    let mut merger = KeyMerger::new();
    let mut skipped = 0usize;

    for path in &files {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        match load_key_file(path, kid_strategy).await {
            Ok(jwk) => {
                if let MergeOutcome::Merged { index } = merger.push(jwk) {
                    debug!(file = %file_name, index, "Merged duplicate key");
                }
            }
            Err(e) => {
                skipped += 1;
                warn!(file = %file_name, reason = e.reason(), "Skipping key file");
                record_key_file_skipped(e.reason());
            }
        }
    }

    let span = tracing::Span::current();
    span.record("key_count", merger.len());
    span.record("skipped", skipped);
    set_key_set_size(merger.len());

    debug!(
        files = files.len(),
        keys = merger.len(),
        skipped,
        "Key set assembled"
    );

    Ok(assemble_key_set(merger))
}

async fn load_key_file(path: &Path, kid_strategy: KidStrategy) -> Result<JsonWebKey, KeyParseError> {
    let text = key_files::read_key_file(path).await?;
    let material = parse_rsa_private_key_pem(&text)?;
    Ok(encode_jwk(&material, kid_strategy))
}
