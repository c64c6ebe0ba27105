//! File-backed storage backend.
//!
//! One file per key under a base directory. Keys may contain characters
//! that are awkward in filenames (the partition separator `:`), so keys
//! are sanitized before use.

use std::path::{Path, PathBuf};

use super::{StorageBackend, StorageError};

/// File-per-key storage under a base directory.
///
/// Writes go to `<dir>/<sanitized-key>.json`. The directory is created on
/// first use.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::WriteFailed` if the directory cannot be
    /// created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| StorageError::WriteFailed {
            key: dir.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize(key)))
    }
}

/// Replace filename-hostile characters with `-`.
fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        write_atomic(&path, value).map_err(|e| StorageError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if let Err(e) = std::fs::remove_file(&path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(key, error = %e, "Failed to remove storage file");
        }
    }
}

/// Write via a temp file and rename so readers never observe a torn write.
fn write_atomic(path: &Path, value: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, value)?;
    std::fs::rename(&tmp, path)
}
