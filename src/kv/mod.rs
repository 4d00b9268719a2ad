//! Key-Value Store Module
//!
//! A flat string-to-string store with localStorage semantics: values are
//! opaque text (JSON for the planner state), writes overwrite, missing keys
//! read as `None`.
//!
//! Backends:
//! - [`MemoryKvStore`]: lives for the process only (tests, dry runs)
//! - [`FileKvStore`]: a JSON object file, flushed durably on every write
//!
//! # Example
//!
//! ```rust
//! use uma_planner::kv::{KvStore, MemoryKvStore};
//!
//! # fn example() -> uma_planner::Result<()> {
//! let store = MemoryKvStore::new();
//!
//! store.set("key", "value")?;
//! assert_eq!(store.get("key")?, Some("value".to_string()));
//!
//! store.delete("key")?;
//! assert!(!store.exists("key")?);
//! # Ok(())
//! # }
//! ```

mod file;
mod memory;

pub use file::FileKvStore;
pub use memory::MemoryKvStore;

use crate::Result;

/// Key-value store used by the persistent planner state.
///
/// All operations complete synchronously: once `set` returns, the value is
/// durable for the backend's lifetime.
pub trait KvStore {
    /// Get a value by key.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Errors
    /// Returns error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value for a key.
    ///
    /// Overwrites any existing value.
    ///
    /// # Errors
    /// Returns error if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key.
    ///
    /// No-op if the key doesn't exist.
    ///
    /// # Errors
    /// Returns error if the deletion cannot be persisted.
    fn delete(&self, key: &str) -> Result<()>;

    /// Check if a key exists.
    ///
    /// # Errors
    /// Returns error if the backend cannot be read.
    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================
    // Trait contract, exercised against both backends
    // ============================================================

    fn check_set_get(store: &impl KvStore) {
        store.set("key1", "value1").unwrap();
        assert_eq!(store.get("key1").unwrap(), Some("value1".to_string()));
    }

    fn check_overwrite(store: &impl KvStore) {
        store.set("key", "value1").unwrap();
        store.set("key", "value2").unwrap();
        assert_eq!(store.get("key").unwrap(), Some("value2".to_string()));
    }

    fn check_delete_and_exists(store: &impl KvStore) {
        assert!(!store.exists("gone").unwrap());
        store.set("gone", "x").unwrap();
        assert!(store.exists("gone").unwrap());
        store.delete("gone").unwrap();
        assert!(!store.exists("gone").unwrap());
        // Should not error
        store.delete("never-set").unwrap();
    }

    #[test]
    fn test_memory_kv_contract() {
        let store = MemoryKvStore::new();
        check_set_get(&store);
        check_overwrite(&store);
        check_delete_and_exists(&store);
    }

    #[test]
    fn test_file_kv_contract() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::open(dir.path().join("state.json")).unwrap();
        check_set_get(&store);
        check_overwrite(&store);
        check_delete_and_exists(&store);
    }

    #[test]
    fn test_memory_kv_empty_key_and_value() {
        let store = MemoryKvStore::new();
        store.set("", "").unwrap();
        assert_eq!(store.get("").unwrap(), Some(String::new()));
    }
}
