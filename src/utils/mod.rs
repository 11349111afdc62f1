//! Utility modules for configuration constants, error handling and file writes.

pub mod config;
pub mod error;
pub mod fs;

// Re-export commonly used error types for convenience
pub use error::{CollectionError, ConfigError, InvalidToolName, OutputError, StateError};
