//! System adapters for termkit-runtime.
//!
//! This module provides `DefaultCommandRunner` (implements `CommandRunnerPort`)
//! and `DefaultPlatformInfo` (implements `PlatformInfoPort`). They perform
//! the actual process execution and host queries.

mod commands;
mod platform;

use std::time::Duration;

use async_trait::async_trait;
use termkit_core::ports::{CommandError, CommandOutput, CommandRunnerPort, CommandSpec};

pub use platform::DefaultPlatformInfo;

/// Timeout applied to each external query unless configured otherwise.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Default implementation of `CommandRunnerPort`.
///
/// Runs programs through `tokio::process` and kills any that outlive the
/// timeout. Constructed in the CLI composition root and passed to the
/// report builder.
///
/// # Example
///
/// ```ignore
/// use termkit_runtime::DefaultCommandRunner;
/// use termkit_core::ReportBuilder;
///
/// let runner = DefaultCommandRunner::new();
/// let report = ReportBuilder::new(&runner).build().await;
/// ```
#[derive(Debug, Clone)]
pub struct DefaultCommandRunner {
    timeout: Duration,
}

impl DefaultCommandRunner {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_QUERY_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for DefaultCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunnerPort for DefaultCommandRunner {
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput, CommandError> {
        commands::run_with_timeout(command, self.timeout).await
    }
}
