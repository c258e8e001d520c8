//! Process-local storage medium.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::KeyValueStore;
use crate::error::StorageError;

/// In-memory [`KeyValueStore`].
///
/// Clones share the same entries, so a caller can keep a handle to inspect
/// what the cart wrote. Useful for tests and for hosts that do not need the
/// cart to outlive the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryStoreInner>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `value` under `key`.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.entries().insert(key.into(), value.into());
        store
    }

    /// Make every subsequent `set` fail with [`StorageError::Unavailable`].
    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current value under `key`, read synchronously.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!(
                "writes to {key} are disabled"
            )));
        }
        self.entries().insert(key.to_owned(), value);
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
