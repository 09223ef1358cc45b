//! Hostmux Shared Types and Utilities
//!
//! This crate contains types, errors, and utilities shared across the hostmux workspace.

pub mod error;
pub mod machine_name;
pub mod types;

pub use error::*;
pub use machine_name::machine_name;
pub use types::*;
