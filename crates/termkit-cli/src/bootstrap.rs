//! CLI bootstrap - the composition root.
//!
//! Concrete adapters from `termkit-runtime` are instantiated here and handed
//! to handlers as core port trait objects.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use termkit_core::{CommandRunnerPort, PlatformInfoPort};
use termkit_runtime::{DEFAULT_QUERY_TIMEOUT, DefaultCommandRunner, DefaultPlatformInfo};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// How long each external query may run before it is killed.
    pub query_timeout: Duration,
}

impl CliConfig {
    pub fn with_defaults() -> Self {
        Self {
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Config with a per-query timeout given in whole seconds.
    pub fn with_query_timeout_secs(secs: u64) -> Result<Self, CliError> {
        if secs == 0 {
            return Err(CliError::Arguments(
                "--timeout must be at least 1 second".to_string(),
            ));
        }
        Ok(Self {
            query_timeout: Duration::from_secs(secs),
        })
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// Runs host utilities for the device report.
    pub runner: Arc<dyn CommandRunnerPort>,
    /// Static platform metadata for the smoke test.
    pub platform: Arc<dyn PlatformInfoPort>,
}

impl CliContext {
    pub fn runner(&self) -> &dyn CommandRunnerPort {
        self.runner.as_ref()
    }

    pub fn platform(&self) -> &dyn PlatformInfoPort {
        self.platform.as_ref()
    }
}

/// Bootstrap the CLI application.
pub fn bootstrap(config: &CliConfig) -> CliContext {
    CliContext {
        runner: Arc::new(DefaultCommandRunner::with_timeout(config.query_timeout)),
        platform: Arc::new(DefaultPlatformInfo::new()),
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `--verbose`.
/// Logs go to stderr so report output on stdout stays clean.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Token cancelled on the first Ctrl+C.
pub fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::debug!("received Ctrl+C, shutting down");
                trigger.cancel();
            }
            Err(e) => tracing::warn!("failed to listen for Ctrl+C: {}", e),
        }
    });
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_rejected() {
        let err = CliConfig::with_query_timeout_secs(0).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_timeout_in_seconds() {
        let config = CliConfig::with_query_timeout_secs(3).unwrap();
        assert_eq!(config.query_timeout, Duration::from_secs(3));
        assert_eq!(CliConfig::default().query_timeout, DEFAULT_QUERY_TIMEOUT);
    }
}
