//! Namespaced key store with a persisted index of every key it has written.
//!
//! SYSTEM CONTEXT
//! ==============
//! The underlying storage (browser `localStorage` in production) offers no
//! portable "list keys with this prefix" operation, so `KeyStore` keeps its own
//! `KeyIndex` and persists it under a reserved key after every change. Bulk
//! clear walks the index instead of the whole store.
//!
//! ERROR HANDLING
//! ==============
//! Every operation reports failure as a [`StoreError`]. Callers that want the
//! page-facing "silently nothing happened" behaviour collapse those errors
//! themselves (see `binding`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::Namespace;

/// Error returned by [`KeyStore`] and [`Storage`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No storage backend exists on this host.
    #[error("storage is unavailable")]
    Unavailable,
    /// The caller passed an empty cache key.
    #[error("cache key is empty")]
    EmptyKey,
    /// The caller passed empty data to store.
    #[error("refusing to store empty data")]
    EmptyData,
    /// The backend rejected the operation (quota, security policy, ...).
    #[error("storage backend error: {0}")]
    Backend(String),
    /// The key index could not be encoded.
    #[error("key index could not be encoded: {0}")]
    Index(#[from] serde_json::Error),
}

/// Synchronous string key-value storage, shaped like `window.localStorage`.
pub trait Storage {
    /// Read the value under `key`. `Ok(None)` when the key was never set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the backend refuses the read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the backend refuses the write.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the backend refuses the delete.
    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory [`Storage`] for tests and non-browser hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of raw entries, including the key index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Raw value under an already-namespaced key.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Iterate raw keys in sorted order.
    pub fn raw_keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Registry of namespaced keys currently written by a [`KeyStore`].
///
/// Persisted as a JSON object mapping each namespaced key to itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyIndex(BTreeMap<String, String>);

impl KeyIndex {
    #[must_use]
    pub fn contains(&self, namespaced: &str) -> bool {
        self.0.contains_key(namespaced)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Namespaced keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn insert(&mut self, namespaced: String) {
        self.0.insert(namespaced.clone(), namespaced);
    }

    fn remove(&mut self, namespaced: &str) {
        self.0.remove(namespaced);
    }

    fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Namespaced wrapper over a [`Storage`] that owns the [`KeyIndex`].
///
/// One instance per page. `open` loads the persisted index; there is no
/// teardown beyond dropping it.
#[derive(Debug)]
pub struct KeyStore<S> {
    backend: Option<S>,
    namespace: Namespace,
    index: KeyIndex,
}

impl<S: Storage> KeyStore<S> {
    /// Open a store over `backend`, loading the persisted key index.
    ///
    /// A missing index starts empty. An unreadable or corrupt index is logged
    /// and replaced by an empty one on the next write.
    pub fn open(backend: S, namespace: Namespace) -> Self {
        let index = match backend.get_item(namespace.index_key()) {
            Ok(Some(raw)) => match KeyIndex::decode(&raw) {
                Ok(index) => index,
                Err(e) => {
                    log::warn!("formcache: discarding corrupt key index: {e}");
                    KeyIndex::default()
                }
            },
            Ok(None) => KeyIndex::default(),
            Err(e) => {
                log::warn!("formcache: key index unreadable: {e}");
                KeyIndex::default()
            }
        };
        Self { backend: Some(backend), namespace, index }
    }

    /// A store for hosts without storage. Every operation is a no-op that
    /// reports [`StoreError::Unavailable`].
    #[must_use]
    pub fn unavailable(namespace: Namespace) -> Self {
        Self { backend: None, namespace, index: KeyIndex::default() }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    #[must_use]
    pub fn backend(&self) -> Option<&S> {
        self.backend.as_ref()
    }

    /// Give the backend back, e.g. to reopen it as a fresh page would.
    pub fn into_backend(self) -> Option<S> {
        self.backend
    }

    /// Store `data` under `key`, overwriting any previous value, and record
    /// the key in the index.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unavailable`], [`StoreError::EmptyKey`] and
    /// [`StoreError::EmptyData`] leave storage untouched; backend failures
    /// are passed through.
    pub fn add(&mut self, key: &str, data: &str) -> Result<(), StoreError> {
        let backend = self.backend.as_mut().ok_or(StoreError::Unavailable)?;
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        if data.is_empty() {
            return Err(StoreError::EmptyData);
        }
        let namespaced = self.namespace.entry_key(key);
        backend.set_item(&namespaced, data)?;
        self.index.insert(namespaced);
        self.persist_index()
    }

    /// Raw string stored under `key`, or `Ok(None)` when nothing is stored.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unavailable`] and [`StoreError::EmptyKey`], or a backend failure.
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let backend = self.backend.as_ref().ok_or(StoreError::Unavailable)?;
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        backend.get_item(&self.namespace.entry_key(key))
    }

    /// Delete the entry under `key` and drop it from the index.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unavailable`] and [`StoreError::EmptyKey`], or a backend failure.
    pub fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.backend.is_none() {
            return Err(StoreError::Unavailable);
        }
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        let namespaced = self.namespace.entry_key(key);
        self.remove_namespaced(&namespaced)
    }

    /// Remove every indexed entry. Returns how many were removed.
    ///
    /// The index is persisted after each removal, so a failure part way
    /// through leaves it describing exactly what remains.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unavailable`], or the first backend failure.
    pub fn clear_all(&mut self) -> Result<usize, StoreError> {
        if self.backend.is_none() {
            return Err(StoreError::Unavailable);
        }
        let pending: Vec<String> = self.index.keys().map(str::to_string).collect();
        for namespaced in &pending {
            self.remove_namespaced(namespaced)?;
        }
        log::debug!("formcache: cleared {} cached forms", pending.len());
        Ok(pending.len())
    }

    /// Snapshot of the key index. Later writes are not reflected in it.
    #[must_use]
    pub fn keys(&self) -> KeyIndex {
        self.index.clone()
    }

    fn remove_namespaced(&mut self, namespaced: &str) -> Result<(), StoreError> {
        let backend = self.backend.as_mut().ok_or(StoreError::Unavailable)?;
        backend.remove_item(namespaced)?;
        self.index.remove(namespaced);
        self.persist_index()
    }

    fn persist_index(&mut self) -> Result<(), StoreError> {
        let backend = self.backend.as_mut().ok_or(StoreError::Unavailable)?;
        if self.index.is_empty() {
            return backend.remove_item(self.namespace.index_key());
        }
        let raw = self.index.encode()?;
        backend.set_item(self.namespace.index_key(), &raw)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
