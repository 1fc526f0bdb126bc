//! Text rendering of the device report.

use termkit_core::{Report, ReportSection, SectionKind, SectionStatus};

use super::tables::{RULE_WIDTH, center, format_row, rule};

/// Column width of field labels.
const LABEL_WIDTH: usize = 17;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Note why degraded sections fell back to placeholders.
    pub verbose: bool,
}

/// Render `report` as the framed text report.
pub fn render_report(report: &Report, options: &RenderOptions) -> String {
    let mut out = banner("📱 ANDROID DEVICE INFORMATION");
    out.push('\n');

    for section in &report.sections {
        render_section(&mut out, section, options);
        out.push('\n');
    }

    out.push_str(&banner("✔ DEVICE CHECK COMPLETE"));
    out.push('\n');
    out
}

fn render_section(out: &mut String, section: &ReportSection, options: &RenderOptions) {
    out.push_str(&heading(section));
    out.push('\n');

    for field in &section.fields {
        out.push_str(&format_row(&field.label, &field.value, LABEL_WIDTH));
        out.push('\n');
    }

    if options.verbose {
        if let SectionStatus::Degraded { reason } = &section.status {
            out.push_str(&format!("(degraded: {reason})\n"));
        }
    }
}

fn heading(section: &ReportSection) -> String {
    let icon = section.kind.icon();
    if section.kind == SectionKind::Device {
        format!("{icon} {} {icon}", section.title)
    } else {
        format!("{icon} {}", section.title)
    }
}

fn banner(text: &str) -> String {
    let rule = rule(RULE_WIDTH);
    format!("{rule}\n{}\n{rule}\n", center(text, RULE_WIDTH))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use termkit_core::{QueryFailure, QueryOutcome, extract_section};

    use super::*;

    fn report_with(outcomes: impl Fn(SectionKind) -> QueryOutcome) -> Report {
        Report {
            sections: SectionKind::ALL
                .iter()
                .map(|&kind| extract_section(kind, &outcomes(kind)))
                .collect(),
        }
    }

    fn unavailable(_: SectionKind) -> QueryOutcome {
        QueryOutcome::Unavailable(QueryFailure::Empty)
    }

    #[test]
    fn test_battery_lines() {
        let report = report_with(|kind| match kind {
            SectionKind::Battery => QueryOutcome::Data(
                json!({"percentage": 87, "plugged": "UNPLUGGED", "health": "GOOD"}),
            ),
            other => unavailable(other),
        });
        let text = render_report(&report, &RenderOptions::default());

        assert!(text.contains("Percentage       : 87%\n"));
        assert!(text.contains("Charging         : UNPLUGGED\n"));
        assert!(text.contains("Health           : GOOD\n"));
    }

    #[test]
    fn test_volume_stream_line() {
        let report = report_with(|kind| match kind {
            SectionKind::Volume => {
                QueryOutcome::Data(json!({"music": {"volume": 7, "max_volume": 15}}))
            }
            other => unavailable(other),
        });
        let text = render_report(&report, &RenderOptions::default());
        assert!(text.contains("Music            : 7/15\n"));
    }

    #[test]
    fn test_all_failures_still_render_every_section_in_order() {
        let report = report_with(unavailable);
        let text = render_report(&report, &RenderOptions::default());

        let mut last = 0;
        for kind in SectionKind::ALL {
            let pos = text[last..]
                .find(kind.title())
                .unwrap_or_else(|| panic!("missing {}", kind.title()));
            last += pos;
        }
        assert!(text.contains("Model            : Unknown Device\n"));
        assert!(text.contains("SSID             : unknown\n"));
        assert!(!text.contains("degraded"));
    }

    #[test]
    fn test_banners_frame_report() {
        let text = render_report(&report_with(unavailable), &RenderOptions::default());
        assert!(text.starts_with(&rule(RULE_WIDTH)));
        assert!(text.contains("📱 ANDROID DEVICE INFORMATION"));
        assert!(text.contains("🔥 DEVICE INFO 🔥\n"));
        assert!(text.trim_end().ends_with(&rule(RULE_WIDTH)));
    }

    #[test]
    fn test_verbose_notes_degraded_sections() {
        let report = report_with(unavailable);
        let text = render_report(&report, &RenderOptions { verbose: true });
        assert_eq!(
            text.matches("(degraded: ").count(),
            SectionKind::ALL.len()
        );
    }
}
