//! Command runner port: the sole boundary between the report and the host.
//!
//! The report builder only ever asks "run this program and give me its
//! output". Implementations decide how (tokio process, fixtures in tests).

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while running an external command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The program could not be started (missing binary, permissions).
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program did not exit within the configured timeout.
    #[error("`{program}` did not finish within {}ms", .timeout.as_millis())]
    TimedOut { program: String, timeout: Duration },

    /// Waiting on the running program failed.
    #[error("failed waiting for `{program}`: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// A program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub status_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful run that printed `stdout`.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            status_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status_code == Some(0)
    }
}

/// Port for running external commands.
///
/// # Example
///
/// ```ignore
/// use termkit_core::ports::{CommandRunnerPort, CommandSpec};
///
/// async fn battery(runner: &dyn CommandRunnerPort) {
///     let output = runner.run(&CommandSpec::new("termux-battery-status")).await;
///     // ...
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunnerPort: Send + Sync {
    /// Run `command` to completion and capture its output.
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput, CommandError>;
}
