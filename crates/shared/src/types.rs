//! Common types used across hostmux

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::machine_name::machine_name;

// =============================================================================
// ID Wrappers
// =============================================================================

/// Domain ID wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainId(pub Uuid);

impl DomainId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DomainId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DomainId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// Domain Records
// =============================================================================

/// A registered tenant domain.
///
/// `key` and `hostname` are fixed at creation; `path` and `url` are empty on
/// the stored record and filled in on the per-load working copy by the
/// internal enrichment phase. `extension_data` belongs to external hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Stable identifier, assigned at create time
    pub id: DomainId,
    /// Normalized machine name, unique within a registry
    pub key: String,
    /// Raw hostname the key was derived from
    pub hostname: String,
    /// URL path prefix, set by the enrichment phase on load
    #[serde(default)]
    pub path: String,
    /// Absolute URL, set by the enrichment phase on load
    #[serde(default)]
    pub url: String,
    /// Open map written by external hooks; absent keys are legal
    #[serde(default)]
    pub extension_data: HashMap<String, serde_json::Value>,
}

impl DomainRecord {
    /// Create a fresh record for a hostname. `path`/`url` stay empty until
    /// the enrichment phase runs on a load.
    pub fn new(hostname: &str) -> Self {
        Self {
            id: DomainId::new(),
            key: machine_name(hostname),
            hostname: hostname.to_string(),
            path: String::new(),
            url: String::new(),
            extension_data: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_unenriched() {
        let record = DomainRecord::new("Example.COM");
        assert_eq!(record.key, "example_com");
        assert_eq!(record.hostname, "Example.COM");
        assert!(record.path.is_empty());
        assert!(record.url.is_empty());
        assert!(record.extension_data.is_empty());
    }

    #[test]
    fn test_record_ids_are_unique() {
        let a = DomainRecord::new("one.example.com");
        let b = DomainRecord::new("two.example.com");
        assert_ne!(a.id, b.id);
    }
}
