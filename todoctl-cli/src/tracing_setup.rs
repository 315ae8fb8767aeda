//! Tracing setup for the todoctl CLI
//!
//! Usage:
//!   todoctl --debug serve              # Debug logging to console
//!   RUST_LOG=todoctl_server=debug todoctl serve
//!
//! Environment variables:
//!   RUST_LOG                          # Log filter (default: info)

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (used unless RUST_LOG is explicitly set)
    pub debug: bool,
}

/// Initialize console tracing
pub fn init(config: &TracingConfig) -> Result<()> {
    let default_level = if config.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
