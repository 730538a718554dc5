//! Typed cache over a key-value store.

use crate::{CacheError, FileStore, KvStore, MemoryStore};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Type-safe cache with automatic JSON serialization.
///
/// Cloning is cheap; clones share the same underlying store.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KvStore>,
}

impl Cache {
    /// Wrap an existing store.
    pub fn new(store: impl KvStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// An in-memory cache.
    pub fn memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Open a file-backed cache at `path`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open(".shop/storage.json")?;
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        Ok(Self::new(FileStore::open(path)?))
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and an error if the stored
    /// text does not deserialize as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.store.get(key)?.is_some())
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::memory()
    }
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}
