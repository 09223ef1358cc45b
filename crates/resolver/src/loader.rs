//! Domain loader
//!
//! The entry point handed to request routing: normalize the hostname, find
//! the stored record, run the hook pipeline over a working copy, return the
//! enriched copy. The stored record is never touched by a load.

use std::sync::Arc;

use hostmux_shared::{machine_name, DomainError, DomainId, DomainRecord, DomainResult};

use crate::cache::ResolutionCache;
use crate::config::ResolverConfig;
use crate::hooks::HookPipeline;
use crate::registry::DomainRegistry;

pub struct DomainLoader {
    registry: Arc<DomainRegistry>,
    pipeline: HookPipeline,
    cache: ResolutionCache,
}

impl DomainLoader {
    /// Build a loader over a registry and a fully registered pipeline,
    /// with the default cache TTL
    pub fn new(registry: Arc<DomainRegistry>, pipeline: HookPipeline) -> Self {
        Self {
            registry,
            pipeline,
            cache: ResolutionCache::new(),
        }
    }

    /// Build a loader with cache TTL taken from configuration
    pub fn with_config(
        registry: Arc<DomainRegistry>,
        pipeline: HookPipeline,
        config: &ResolverConfig,
    ) -> Self {
        Self {
            registry,
            pipeline,
            cache: ResolutionCache::with_ttl(config.cache_ttl),
        }
    }

    /// Resolve a request hostname to an enriched domain record.
    ///
    /// Returns:
    /// - Ok(record) with non-empty `path`/`url` if the hostname resolved
    /// - Err(NotFound) if no domain is registered for the hostname
    /// - Err(Extension) if a registered hook failed; the working copy is
    ///   discarded and nothing is persisted
    pub fn load(&self, hostname: &str) -> DomainResult<DomainRecord> {
        let key = machine_name(hostname);

        let stored = match self.cache.get(&key) {
            Some(Some(record)) => record,
            Some(None) => {
                return Err(DomainError::NotFound { key });
            }
            None => match self.registry.lookup(&key) {
                Ok(record) => {
                    self.cache.set(&key, Some(record.clone()));
                    record
                }
                Err(DomainError::NotFound { key }) => {
                    self.cache.set(&key, None);
                    return Err(DomainError::NotFound { key });
                }
                Err(other) => return Err(other),
            },
        };

        // Working copy; the registry's record stays unenriched
        let mut domain = stored;
        self.pipeline.run(&mut domain)?;

        tracing::debug!(key = %domain.key, url = %domain.url, "Loaded domain");
        Ok(domain)
    }

    /// Invalidate the cache entry for a hostname (e.g. after provisioning)
    pub fn invalidate_host(&self, hostname: &str) {
        self.cache.invalidate(&machine_name(hostname));
    }

    /// Invalidate all cached entries for a domain
    pub fn invalidate_id(&self, id: DomainId) {
        self.cache.invalidate_id(id);
    }

    /// Get the resolution cache for statistics/management
    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// The registry this loader resolves against
    pub fn registry(&self) -> &Arc<DomainRegistry> {
        &self.registry
    }
}
