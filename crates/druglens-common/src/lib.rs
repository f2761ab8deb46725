//! druglens-common: Shared configuration and error types used across the druglens crates.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{Config, PharmacokineticPolicy, RdkitConfig, ServerConfig};
pub use error::{DruglensError, Result};
