//! Fire animation command handler.

use std::time::Duration;

use anyhow::Result;
use termkit_runtime::{AnimationOptions, FireAnimation, run_fire};
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

use crate::error::CliError;

/// Run the animation on stdout until Ctrl+C or `bursts` is reached.
pub async fn execute(
    seed: Option<u64>,
    cadence_ms: u64,
    bursts: Option<u64>,
    shutdown: &CancellationToken,
) -> Result<()> {
    let options = animation_options(cadence_ms, bursts)?;
    let mut animation = FireAnimation::new(seed);
    let mut stdout = tokio::io::stdout();

    let written = run_fire(&mut stdout, &mut animation, options, shutdown)
        .await
        .map_err(CliError::from)?;

    // Leave the terminal in its default colors
    stdout
        .write_all(b"\x1b[0m\n")
        .await
        .map_err(CliError::from)?;
    stdout.flush().await.map_err(CliError::from)?;

    tracing::debug!(bursts = written, "fire animation stopped");
    Ok(())
}

fn animation_options(cadence_ms: u64, bursts: Option<u64>) -> Result<AnimationOptions, CliError> {
    if cadence_ms == 0 {
        return Err(CliError::Arguments(
            "--cadence-ms must be at least 1".to_string(),
        ));
    }
    Ok(AnimationOptions {
        cadence: Duration::from_millis(cadence_ms),
        max_bursts: bursts,
    })
}
