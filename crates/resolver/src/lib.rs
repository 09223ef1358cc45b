//! Hostmux Resolution Engine
//!
//! Maps request hostnames to registered tenant domains and runs the hook
//! pipeline over every loaded record:
//! - Normalization: `Example.COM:8080` -> machine name `example_com`
//! - Registry: create/lookup/delete against a pluggable key-value store
//! - Pipeline: fixed path/url enrichment, then registered hooks in order
//! - Loader: the `load(hostname)` entry point handed to request routing

pub mod cache;
pub mod config;
pub mod hooks;
pub mod loader;
pub mod registry;
pub mod store;

pub use cache::{CacheStats, ResolutionCache};
pub use config::{ConfigError, EnrichmentConfig, ResolverConfig};
pub use hooks::{DomainHook, HookPipeline};
pub use loader::DomainLoader;
pub use registry::DomainRegistry;
pub use store::{DomainStore, MemoryStore};
