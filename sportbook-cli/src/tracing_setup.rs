//! Tracing setup for the sportbook CLI
//!
//! Usage:
//!   sportbook --debug serve             # Debug logging to console
//!   RUST_LOG=sportbook_server=debug ... # Fine-grained log control
//!
//! The menu keeps logging at `warn` unless `--debug` or `RUST_LOG` says
//! otherwise, so log lines do not interleave with prompts.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets the level to debug if RUST_LOG is unset)
    pub debug: bool,
    /// Interactive session: default to warn instead of info
    pub quiet: bool,
}

impl TracingConfig {
    fn default_directive(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

/// Initialize console tracing
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_wins_over_quiet() {
        let config = TracingConfig {
            debug: true,
            quiet: true,
        };
        assert_eq!(config.default_directive(), "debug");
        assert_eq!(TracingConfig::default().default_directive(), "info");
    }
}
