//! Device report command handler.

use std::io::Write;

use anyhow::Result;
use termkit_core::{Report, ReportBuilder};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{RenderOptions, render_report};

/// Query every section and print the report.
///
/// Query failures only degrade sections; failing to write stdout is an error.
pub async fn execute(ctx: &CliContext, json: bool, verbose: bool) -> Result<()> {
    let report = ReportBuilder::new(ctx.runner()).build().await;
    tracing::debug!(degraded = report.degraded_count(), "device report built");

    let mut stdout = std::io::stdout().lock();
    write_report(&mut stdout, &report, json, verbose)?;
    Ok(())
}

fn write_report(
    out: &mut impl Write,
    report: &Report,
    json: bool,
    verbose: bool,
) -> Result<(), CliError> {
    if json {
        let text = serde_json::to_string_pretty(report)?;
        writeln!(out, "{text}")?;
    } else {
        out.write_all(render_report(report, &RenderOptions { verbose }).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use termkit_core::{QueryFailure, QueryOutcome, SectionKind, extract_section};

    use super::*;

    fn degraded_report() -> Report {
        Report {
            sections: SectionKind::ALL
                .iter()
                .map(|&kind| {
                    extract_section(kind, &QueryOutcome::Unavailable(QueryFailure::Empty))
                })
                .collect(),
        }
    }

    #[test]
    fn test_json_output_lists_sections_in_order() {
        let mut buf = Vec::new();
        write_report(&mut buf, &degraded_report(), true, false).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let kinds: Vec<&str> = value["sections"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["kind"].as_str().unwrap())
            .collect();
        assert_eq!(
            kinds,
            ["device", "battery", "wifi", "storage", "volume", "brightness"]
        );
        assert_eq!(value["sections"][0]["status"]["state"], "degraded");
    }

    #[test]
    fn test_text_output() {
        let mut buf = Vec::new();
        write_report(&mut buf, &degraded_report(), false, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("🔋 BATTERY\n"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_closed_stdout_is_io_error() {
        let err = write_report(&mut ClosedPipe, &degraded_report(), true, false).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
        assert_eq!(err.exit_code(), 74);
    }
}
