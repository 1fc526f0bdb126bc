//! Smoke test command handler.

use std::time::Duration;

use anyhow::Result;
use termkit_runtime::{SmokeOptions, run_smoke_test};
use tokio_util::sync::CancellationToken;

use crate::bootstrap::CliContext;
use crate::error::CliError;

pub async fn execute(
    ctx: &CliContext,
    count: u32,
    interval_ms: u64,
    shutdown: &CancellationToken,
) -> Result<()> {
    let info = ctx.platform().platform_info();
    let options = SmokeOptions {
        count,
        interval: Duration::from_millis(interval_ms),
    };

    let mut stdout = tokio::io::stdout();
    let summary = run_smoke_test(&mut stdout, &info, options, shutdown)
        .await
        .map_err(CliError::from)?;

    tracing::debug!(
        completed = summary.completed,
        requested = summary.requested,
        "smoke test finished"
    );
    Ok(())
}
