//! File-backed KV store.
//!
//! The whole store is one JSON object (`{"key": "value", ...}`). Every
//! mutation rewrites the file through a temporary sibling and a rename, so a
//! crash mid-write leaves the previous contents intact.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use tracing::debug;

use super::KvStore;
use crate::{Error, Result};

/// Key-value store persisted to a JSON file.
///
/// Reads are served from an in-memory copy loaded at [`FileKvStore::open`].
/// A write is flushed to disk first and reaches the in-memory copy only once
/// the flush succeeded.
#[derive(Debug)]
pub struct FileKvStore {
    path: PathBuf,
    cache: DashMap<String, String>,
}

impl FileKvStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file is an empty store; the file is created on first write.
    ///
    /// # Errors
    /// Returns [`Error::StorageError`] if the file exists but is not a JSON
    /// object of strings, or [`Error::Io`] if it cannot be read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let cache = DashMap::new();

        if path.exists() {
            let text = fs::read_to_string(&path)?;
            if !text.trim().is_empty() {
                let entries: BTreeMap<String, String> =
                    serde_json::from_str(&text).map_err(|e| {
                        Error::StorageError(format!(
                            "state file {} is not a JSON object of strings: {e}",
                            path.display()
                        ))
                    })?;
                for (key, value) in entries {
                    cache.insert(key, value);
                }
            }
        }

        debug!(path = %path.display(), entries = cache.len(), "opened state file");
        Ok(Self { path, cache })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        self.cache
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    fn flush(&self, snapshot: &BTreeMap<String, String>) -> Result<()> {
        let text = serde_json::to_string_pretty(snapshot)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(text.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path).map_err(|e| {
            Error::StorageError(format!("failed to replace {}: {e}", self.path.display()))
        })?;
        Ok(())
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cache.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut next = self.snapshot();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        self.cache.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut next = self.snapshot();
        if next.remove(key).is_some() {
            self.flush(&next)?;
            self.cache.remove(key);
        }
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.cache.contains_key(key))
    }
}
