//! Process execution with a hard timeout.

use std::process::Stdio;
use std::time::Duration;

use termkit_core::ports::{CommandError, CommandOutput, CommandSpec};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Run `spec` to completion, capturing stdout and stderr.
///
/// The child is spawned with `kill_on_drop`, so abandoning the wait after
/// `limit` also kills the process.
pub async fn run_with_timeout(
    spec: &CommandSpec,
    limit: Duration,
) -> Result<CommandOutput, CommandError> {
    debug!(command = %spec, "running external command");

    let child = Command::new(&spec.program)
        .args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| CommandError::Spawn {
            program: spec.program.clone(),
            source,
        })?;

    match timeout(limit, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(CommandOutput {
            status_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }),
        Ok(Err(source)) => Err(CommandError::Wait {
            program: spec.program.clone(),
            source,
        }),
        Err(_) => {
            warn!(command = %spec, timeout_ms = %limit.as_millis(), "command timed out, killed");
            Err(CommandError::TimedOut {
                program: spec.program.clone(),
                timeout: limit,
            })
        }
    }
}
