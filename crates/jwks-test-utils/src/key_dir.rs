//! Temporary key directories.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A key directory that is deleted when dropped.
///
/// # Example
/// ```rust,ignore
/// let keys = TestKeyDir::new()
///     .with_file("a.pem", RSA_KEY_A_PKCS1_PEM)
///     .with_file("b.pem", RSA_KEY_B_PKCS1_PEM);
/// ```
pub struct TestKeyDir {
    dir: TempDir,
}

impl TestKeyDir {
    /// Create an empty key directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temporary key directory"),
        }
    }

    /// Builder form of [`TestKeyDir::write`].
    pub fn with_file(self, name: &str, contents: impl AsRef<[u8]>) -> Self {
        self.write(name, contents);
        self
    }

    /// Write (or overwrite) a file in the directory.
    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) {
        fs::write(self.dir.path().join(name), contents)
            .unwrap_or_else(|e| panic!("failed to write key file {name}: {e}"));
    }

    /// Delete a file from the directory.
    pub fn remove(&self, name: &str) {
        fs::remove_file(self.dir.path().join(name))
            .unwrap_or_else(|e| panic!("failed to remove key file {name}: {e}"));
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A path inside the temporary directory that does not exist.
    pub fn missing_path(&self) -> PathBuf {
        self.dir.path().join("App_Data")
    }
}

impl Default for TestKeyDir {
    fn default() -> Self {
        Self::new()
    }
}
