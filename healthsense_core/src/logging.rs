//! Logging setup for HealthSense.
//!
//! Stdout belongs to the interactive menu, so console logs go to stderr.

use crate::{Error, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the console subscriber
///
/// `default_level` applies unless RUST_LOG is set. An unparsable level or a
/// second initialization is reported as a configuration error.
pub fn init_console(default_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .map_err(|e| Error::Config(format!("log level '{}': {}", default_level, e)))?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| Error::Config(format!("logging already initialized: {}", e)))
}

/// Route logs through the test harness at debug level
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
