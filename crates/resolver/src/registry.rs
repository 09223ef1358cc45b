//! Domain registry
//!
//! Owns the set of known tenant domains, keyed by machine name. Reads go
//! straight to the store; creation is serialized so the check-then-insert
//! uniqueness invariant holds under concurrent provisioning.

use std::sync::Mutex;

use hostmux_shared::{machine_name, DomainError, DomainRecord, DomainResult};

use crate::store::{DomainStore, MemoryStore};

pub struct DomainRegistry {
    store: Box<dyn DomainStore>,
    /// Serializes create so exists+put is atomic with respect to other creates
    create_lock: Mutex<()>,
}

impl DomainRegistry {
    /// Create a registry backed by an in-memory store
    pub fn new() -> Self {
        Self::with_store(Box::new(MemoryStore::new()))
    }

    /// Create a registry backed by a caller-supplied store
    pub fn with_store(store: Box<dyn DomainStore>) -> Self {
        Self {
            store,
            create_lock: Mutex::new(()),
        }
    }

    /// Register a new domain for `hostname`.
    ///
    /// The machine name is derived here; fails with `DuplicateKey` if a
    /// record already exists under it. The returned record has empty
    /// `path`/`url`/`extension_data`.
    pub fn create(&self, hostname: &str) -> DomainResult<DomainRecord> {
        if hostname.is_empty() {
            return Err(DomainError::InvalidHostname(
                "hostname must be non-empty".to_string(),
            ));
        }

        let _guard = self
            .create_lock
            .lock()
            .map_err(|_| DomainError::Storage("registry lock poisoned".to_string()))?;

        let key = machine_name(hostname);
        if self.store.exists(&key)? {
            return Err(DomainError::DuplicateKey { key });
        }

        let record = DomainRecord::new(hostname);
        self.store.put(record.clone())?;
        tracing::debug!(key = %record.key, hostname = %hostname, "Registered domain");
        Ok(record)
    }

    /// Fetch the stored record for `key`. Pure read; a miss is `NotFound`.
    pub fn lookup(&self, key: &str) -> DomainResult<DomainRecord> {
        self.store.get(key)?.ok_or_else(|| DomainError::NotFound {
            key: key.to_string(),
        })
    }

    /// Remove the record stored under `key`
    pub fn delete(&self, key: &str) -> DomainResult<()> {
        if self.store.remove(key)? {
            tracing::debug!(key = %key, "Deleted domain");
            Ok(())
        } else {
            Err(DomainError::NotFound {
                key: key.to_string(),
            })
        }
    }

    /// Snapshot of all registered domains, in insertion order.
    ///
    /// Each call yields a fresh sequence reflecting the registry at call
    /// time; records created or deleted afterwards are not observed.
    pub fn all(&self) -> impl Iterator<Item = DomainRecord> {
        let keys = self.store.keys().unwrap_or_default();
        let records: Vec<DomainRecord> = keys
            .iter()
            .filter_map(|k| self.store.get(k).ok().flatten())
            .collect();
        records.into_iter()
    }

    pub fn len(&self) -> usize {
        self.store.keys().map(|k| k.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DomainRegistry {
    fn default() -> Self {
        Self::new()
    }
}
