//! Key-value persistence capability consumed by the assignment store.
//!
//! Platform hosts implement [`KvStore`] over whatever semi-durable storage
//! they have: browser local storage, mobile shared preferences, a file. The
//! assignment layer reads and writes a single document under one fixed key,
//! so the contract is deliberately small — string-valued `get`, `set`,
//! `remove`.
//!
//! # Example
//!
//! ```rust,no_run
//! use forkspot_experiments::kv::{KvStore, MemoryKvStore};
//!
//! # async fn example() -> forkspot_experiments::Result<()> {
//! let store = MemoryKvStore::new();
//!
//! store.set("experiments", "{}".to_string()).await?;
//! let value = store.get("experiments").await?;
//! assert_eq!(value.as_deref(), Some("{}"));
//!
//! store.remove("experiments").await?;
//! assert_eq!(store.get("experiments").await?, None);
//! # Ok(())
//! # }
//! ```

mod memory;

pub use memory::MemoryKvStore;

use crate::Result;
use std::future::Future;
use std::sync::Arc;

/// String-valued key-value capability.
///
/// All operations are asynchronous: the backing storage may be an IPC hop or
/// disk I/O on the host platform. Implementations report failures through
/// [`crate::Error`]; the assignment layer logs and degrades rather than
/// propagating them.
pub trait KvStore: Send + Sync {
    /// Get the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Store `value` under `key`, overwriting any existing value.
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<()>> + Send;

    /// Remove `key`. No-op if the key doesn't exist.
    fn remove(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}

impl<S: KvStore> KvStore for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key).await
    }
}
