//! In-memory KV store implementation using `DashMap`.
//!
//! This is the reference backend - data is lost on process restart. Platform
//! hosts bring their own durable implementation.

use super::KvStore;
use crate::Result;
use dashmap::DashMap;

/// In-memory key-value store using a lock-free concurrent hashmap.
///
/// Thread-safe; used by tests, demos, and embedders that want assignment
/// semantics without durability.
///
/// # Example
///
/// ```rust
/// use forkspot_experiments::kv::{KvStore, MemoryKvStore};
///
/// # async fn example() -> forkspot_experiments::Result<()> {
/// let store = MemoryKvStore::new();
/// store.set("hello", "world".to_string()).await?;
/// assert_eq!(store.get("hello").await?, Some("world".to_string()));
/// # Ok(())
/// # }
/// ```
pub struct MemoryKvStore {
    store: DashMap<String, String>,
}

impl MemoryKvStore {
    /// Create a new in-memory KV store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Create with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: DashMap::with_capacity(capacity),
        }
    }

    /// Get the number of entries in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.store.clear();
    }
}

impl Default for MemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.store.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.store.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.store.remove(key);
        Ok(())
    }
}
