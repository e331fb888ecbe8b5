//! Key-Value Store Contract
//!
//! The storage capability consumed by the repositories. Backends are chosen at
//! startup and injected as `Arc<dyn KeyValueStore>`; nothing downstream knows
//! which one it is talking to.
//!
//! Values are JSON documents. A `set` call with several entries is applied as
//! a unit: either every entry lands or none does.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::CoreResult;

/// Uniform get/set over a flat key namespace.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `None` means the key was never written (or was removed).
    async fn get(&self, key: &str) -> CoreResult<Option<Value>>;

    /// Write all entries in one step. Last write wins.
    async fn set(&self, entries: Vec<(String, Value)>) -> CoreResult<()>;

    /// Delete a key. Deleting an absent key is not an error.
    async fn remove(&self, key: &str) -> CoreResult<()>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}

/// Read a key and deserialize it into `T`.
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> CoreResult<Option<T>> {
    match store.get(key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serialize `value` and write it under `key`.
pub async fn set_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> CoreResult<()> {
    let value = serde_json::to_value(value)?;
    store.set(vec![(key.to_string(), value)]).await
}

/// In-process store. Used as the fallback backend and throughout the tests.
///
/// Counts every mutating call so callers can assert that a sequence of
/// operations never touched storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries (does not count as writes)
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Self {
            entries: RwLock::new(entries.into_iter().collect()),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of `set`/`remove` calls served so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> CoreResult<Option<Value>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, entries: Vec<(String, Value)>) -> CoreResult<()> {
        let mut guard = self.entries.write().await;
        for (key, value) in entries {
            guard.insert(key, value);
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        self.entries.write().await.remove(key);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
