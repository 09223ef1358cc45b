//! Pluggable domain storage
//!
//! The registry talks to storage through [`DomainStore`], a minimal key-value
//! surface. Persistence backends live outside this crate; [`MemoryStore`] is
//! the provided in-process implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use hostmux_shared::{DomainError, DomainRecord, DomainResult};

/// Key-value collaborator the registry stores records in.
///
/// `keys` must enumerate in insertion order; implementations are expected to
/// be safe for concurrent reads. Uniqueness is enforced above this trait, by
/// the registry's create path.
pub trait DomainStore: Send + Sync {
    /// Fetch the record stored under `key`, if any
    fn get(&self, key: &str) -> DomainResult<Option<DomainRecord>>;

    /// Store a record under its own `key`, overwriting any existing entry
    fn put(&self, record: DomainRecord) -> DomainResult<()>;

    /// True if a record is stored under `key`
    fn exists(&self, key: &str) -> DomainResult<bool>;

    /// Remove the record under `key`; true if one was present
    fn remove(&self, key: &str) -> DomainResult<bool>;

    /// All stored keys, in insertion order
    fn keys(&self) -> DomainResult<Vec<String>>;
}

/// Thread-safe in-memory store
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    records: HashMap<String, DomainRecord>,
    /// Keys in insertion order, kept in sync with `records`
    order: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// Lock poisoning is surfaced as a storage error rather than a panic
fn poisoned() -> DomainError {
    DomainError::Storage("store lock poisoned".to_string())
}

impl DomainStore for MemoryStore {
    fn get(&self, key: &str) -> DomainResult<Option<DomainRecord>> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner.records.get(key).cloned())
    }

    fn put(&self, record: DomainRecord) -> DomainResult<()> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        if !inner.records.contains_key(&record.key) {
            inner.order.push(record.key.clone());
        }
        inner.records.insert(record.key.clone(), record);
        Ok(())
    }

    fn exists(&self, key: &str) -> DomainResult<bool> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner.records.contains_key(key))
    }

    fn remove(&self, key: &str) -> DomainResult<bool> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        let removed = inner.records.remove(key).is_some();
        if removed {
            inner.order.retain(|k| k != key);
        }
        Ok(removed)
    }

    fn keys(&self) -> DomainResult<Vec<String>> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner.order.clone())
    }
}
