//! Error types for the healthsense_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for healthsense_core operations
///
/// Lookup misses, duplicates and full tables are expected outcomes that the
/// caller checks and reports; none of them leave the engine half-mutated.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Hospital or region lookup miss, or an empty region queue
    #[error("Not found: {0}")]
    NotFound(String),

    /// Hospital name already registered (case-insensitive)
    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    /// Hospital directory or region table is full
    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),

    /// Non-positive week/count or an empty identifying string
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}
