//! Platform smoke test: print platform metadata, then count a few ticks.

use std::io;
use std::time::Duration;

use termkit_core::PlatformInfo;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

const LABEL_WIDTH: usize = 19;

#[derive(Debug, Clone, Copy)]
pub struct SmokeOptions {
    pub count: u32,
    pub interval: Duration,
}

impl Default for SmokeOptions {
    fn default() -> Self {
        Self {
            count: 5,
            interval: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmokeSummary {
    pub completed: u32,
    pub requested: u32,
}

impl SmokeSummary {
    pub const fn finished(&self) -> bool {
        self.completed == self.requested
    }
}

/// Print `info` and count `options.count` ticks, sleeping between them.
///
/// Cancellation stops the count early; the summary reports how far it got.
pub async fn run_smoke_test<W>(
    writer: &mut W,
    info: &PlatformInfo,
    options: SmokeOptions,
    cancel: &CancellationToken,
) -> io::Result<SmokeSummary>
where
    W: AsyncWrite + Unpin,
{
    let mut header = String::from("🔥 termkit is working!\n-------------------------------\n\n");
    for row in info.rows() {
        header.push_str(&format!("{:<LABEL_WIDTH$}: {}\n", row.label, row.value));
    }
    header.push_str("\nRunning a quick loop test:\n");
    writer.write_all(header.as_bytes()).await?;
    writer.flush().await?;

    let mut completed = 0;
    for tick in 1..=options.count {
        if cancel.is_cancelled() {
            break;
        }
        writer
            .write_all(format!("Counting {tick}...\n").as_bytes())
            .await?;
        writer.flush().await?;
        completed = tick;

        if tick < options.count {
            tokio::select! {
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(options.interval) => {}
            }
        }
    }

    let summary = SmokeSummary {
        completed,
        requested: options.count,
    };
    let footer = if summary.finished() {
        "\n🎉 All tests completed!\n".to_string()
    } else {
        format!("\nInterrupted after {completed} of {} ticks.\n", options.count)
    };
    writer.write_all(footer.as_bytes()).await?;
    writer.flush().await?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> PlatformInfo {
        PlatformInfo {
            tool_version: "0.3.0".to_string(),
            os_name: Some("Android".to_string()),
            arch: "aarch64".to_string(),
            ..PlatformInfo::default()
        }
    }

    #[tokio::test]
    async fn test_counts_every_tick() {
        let mut out = Vec::new();
        let options = SmokeOptions {
            count: 5,
            interval: Duration::ZERO,
        };
        let summary = run_smoke_test(&mut out, &info(), options, &CancellationToken::new())
            .await
            .unwrap();

        assert!(summary.finished());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Operating System   : Android"));
        assert!(text.contains("Release Version    : unknown"));
        for tick in 1..=5 {
            assert!(text.contains(&format!("Counting {tick}...")));
        }
        assert!(text.ends_with("🎉 All tests completed!\n"));
    }

    #[tokio::test]
    async fn test_cancelled_run_reports_interruption() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut out = Vec::new();
        let summary = run_smoke_test(&mut out, &info(), SmokeOptions::default(), &cancel)
            .await
            .unwrap();

        assert_eq!(summary.completed, 0);
        assert!(!summary.finished());
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Counting"));
        assert!(text.contains("Interrupted after 0 of 5 ticks."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_elapses_between_ticks() {
        let mut out = Vec::new();
        let start = tokio::time::Instant::now();
        let options = SmokeOptions {
            count: 3,
            interval: Duration::from_millis(500),
        };
        run_smoke_test(&mut out, &info(), options, &CancellationToken::new())
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }
}
