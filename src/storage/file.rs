//! File-backed snapshot storage.
//!
//! Each key maps to one JSON file under the storage directory. Writes go
//! through a temp-then-rename sequence so readers in other processes never
//! observe a partially written snapshot.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{StorageBackend, StorageKey};
use crate::error::Result;

/// Snapshot storage rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `dir`. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The storage directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: StorageKey) -> PathBuf {
        self.dir.join(key.file_name())
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: StorageKey) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path)?;

        // Helper to clean up temp file on failure
        let cleanup_and_err = |e: std::io::Error| {
            let _ = fs::remove_file(&temp_path);
            e
        };

        file.write_all(value.as_bytes()).map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;

        // Atomic rename
        fs::rename(&temp_path, &path).map_err(cleanup_and_err)?;

        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
