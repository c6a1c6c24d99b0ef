use crate::crypto::KeyParseError;
use crate::errors::JwksError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

/// Extension of files picked up from the key directory (`*.pem`).
pub const KEY_FILE_EXTENSION: &str = "pem";

/// List the `*.pem` files directly inside `dir`, sorted by path.
///
/// Subdirectories are ignored, symlinks are followed. An entry whose
/// metadata cannot be read is still listed so the failure is accounted for
/// when the file itself is read.
pub async fn list_pem_files(dir: &Path) -> Result<Vec<PathBuf>, JwksError> {
    match fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(JwksError::KeyDirectoryNotFound(dir.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(JwksError::KeyDirectoryNotFound(dir.to_path_buf()));
        }
        Err(e) => return Err(JwksError::KeyDirectoryUnreadable(e.to_string())),
    }

    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| JwksError::KeyDirectoryUnreadable(e.to_string()))?;

    let mut files = Vec::new();
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Key directory listing stopped early");
                break;
            }
        };

        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(KEY_FILE_EXTENSION) {
            continue;
        }

        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => files.push(path),
            Ok(_) => {}
            Err(_) => files.push(path),
        }
    }

    files.sort();
    Ok(files)
}

/// Read a key file as text.
///
/// Invalid UTF-8 is replaced rather than rejected; explanatory text around the
/// PEM armor may be in any encoding. I/O failures are reported as
/// [`KeyParseError::Unreadable`] so one bad file is skipped like any other
/// unusable key file.
pub async fn read_key_file(path: &Path) -> Result<String, KeyParseError> {
    let bytes = fs::read(path)
        .await
        .map_err(|e| KeyParseError::Unreadable(e.to_string()))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
