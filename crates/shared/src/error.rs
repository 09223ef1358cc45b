//! Error types for hostmux

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No domain registered for key: {key}")]
    NotFound { key: String },

    #[error("Domain key already exists: {key}")]
    DuplicateKey { key: String },

    #[error("Invalid hostname: {0}")]
    InvalidHostname(String),

    #[error("Hook '{hook}' failed during domain load: {source}")]
    Extension { hook: String, source: anyhow::Error },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// True for failures caused by a misbehaving extension rather than bad
    /// input; callers should map these to a server-side error class.
    pub fn is_extension_failure(&self) -> bool {
        matches!(self, DomainError::Extension { .. })
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
