//! finguard-common — Shared error type and catalog configuration used across all finguard crates.

pub mod error;
pub mod catalog_config;

// Re-export commonly used types
pub use catalog_config::{CatalogConfig, ContextPatterns, IntentPatterns};
pub use error::{FinguardError, Result};
