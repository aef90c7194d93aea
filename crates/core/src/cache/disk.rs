//! Directory-backed cache: one `<key>.json` file per entry.
//!
//! Writes land in a temp file inside the cache directory and are renamed
//! into place, so a reader never sees a half-written entry even if two
//! processes store the same key at once.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{CacheEntry, ContentCache};
use crate::Error;

const ENTRY_EXTENSION: &str = "json";

/// Cache handle rooted at a directory.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    /// Open a cache rooted at `dir`, creating the directory if it is missing.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| Error::Cache(format!("failed to create {}: {e}", dir.display())))?;

        tracing::debug!(dir = %dir.display(), "opened disk cache");
        Ok(Self { dir })
    }

    /// Directory holding the entry files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file for `key`, or `None` if the key is not a hex digest.
    fn entry_path(&self, key: &str) -> Option<PathBuf> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(self.dir.join(format!("{key}.{ENTRY_EXTENSION}")))
    }

    fn entry_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for item in fs::read_dir(&self.dir)? {
            let path = item?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == ENTRY_EXTENSION) {
                files.push(path);
            }
        }
        Ok(files)
    }

    /// Number of stored entries.
    pub fn len(&self) -> Result<usize, Error> {
        self.entry_files()
            .map(|files| files.len())
            .map_err(|e| Error::Cache(e.to_string()))
    }

    pub fn is_empty(&self) -> Result<bool, Error> {
        self.len().map(|n| n == 0)
    }

    /// Delete every entry. Returns the number of removed files.
    pub fn clear(&self) -> Result<u64, Error> {
        let files = self.entry_files().map_err(|e| Error::Cache(e.to_string()))?;
        let mut removed = 0;
        for path in files {
            fs::remove_file(&path).map_err(|e| Error::Cache(format!("failed to remove {}: {e}", path.display())))?;
            removed += 1;
        }
        tracing::debug!(removed, "cleared disk cache");
        Ok(removed)
    }
}

impl ContentCache for DiskCache {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        let path = self.entry_path(key)?;

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), "unreadable cache entry: {e}");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(path = %path.display(), "corrupt cache entry treated as miss: {e}");
                None
            }
        }
    }

    fn put(&self, key: &str, entry: &CacheEntry) -> Result<(), Error> {
        let path = self
            .entry_path(key)
            .ok_or_else(|| Error::Cache(format!("invalid cache key: {key}")))?;

        let json = serde_json::to_vec(entry).map_err(|e| Error::Cache(e.to_string()))?;

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| Error::Cache(e.to_string()))?;
        tmp.write_all(&json).map_err(|e| Error::Cache(e.to_string()))?;
        tmp.persist(&path)
            .map_err(|e| Error::Cache(format!("failed to persist {}: {}", path.display(), e.error)))?;

        Ok(())
    }
}
