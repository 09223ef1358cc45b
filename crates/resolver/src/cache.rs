//! In-memory resolution cache with TTL
//!
//! Caches machine-name lookups to spare the registry's store on hot paths.
//! Entries hold the *stored* record (pre-enrichment); the pipeline still runs
//! on every load. Negative entries remember that a key resolved to nothing.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use hostmux_shared::{DomainId, DomainRecord};

/// Default cache TTL (5 minutes)
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Cache entry with expiration
#[derive(Clone)]
struct CacheEntry {
    record: Option<DomainRecord>,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(record: Option<DomainRecord>, ttl: Duration) -> Self {
        Self {
            record,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Thread-safe in-memory lookup cache
pub struct ResolutionCache {
    /// Maps machine name -> stored record (None means the key resolves to nothing)
    cache: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionCache {
    /// Create a new cache with default TTL
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Create a new cache with custom TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Get the cached result for a machine name
    /// Returns Some(Some(record)) if found and valid
    /// Returns Some(None) if the key was cached as not resolving
    /// Returns None if not in cache or expired
    pub fn get(&self, key: &str) -> Option<Option<DomainRecord>> {
        let cache = self.cache.read().ok()?;
        let entry = cache.get(key)?;

        if entry.is_expired() {
            None
        } else {
            Some(entry.record.clone())
        }
    }

    /// Cache a key -> stored record mapping
    pub fn set(&self, key: &str, record: Option<DomainRecord>) {
        if self.ttl.is_zero() {
            return;
        }
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key.to_string(), CacheEntry::new(record, self.ttl));
        }
    }

    /// Invalidate a specific machine name
    pub fn invalidate(&self, key: &str) {
        if let Ok(mut cache) = self.cache.write() {
            cache.remove(key);
        }
    }

    /// Invalidate all entries for a domain (useful when a record changes)
    pub fn invalidate_id(&self, id: DomainId) {
        if let Ok(mut cache) = self.cache.write() {
            cache.retain(|_, entry| entry.record.as_ref().map(|r| r.id) != Some(id));
        }
    }

    /// Clear expired entries (call periodically for memory management)
    pub fn cleanup(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.retain(|_, entry| !entry.is_expired());
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        if let Ok(cache) = self.cache.read() {
            let total = cache.len();
            let expired = cache.values().filter(|e| e.is_expired()).count();
            CacheStats {
                total_entries: total,
                expired_entries: expired,
                active_entries: total - expired,
            }
        } else {
            CacheStats::default()
        }
    }
}

/// Cache statistics
#[derive(Default, Debug)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub active_entries: usize,
}
