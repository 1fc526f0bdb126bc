//! Text layout helpers for CLI output.

/// Width of the `====` rules framing the device report.
pub const RULE_WIDTH: usize = 47;

/// A horizontal rule of `width` `=` characters.
pub fn rule(width: usize) -> String {
    "=".repeat(width)
}

/// Center `text` within `width` columns by left-padding with spaces.
///
/// Text wider than `width` is returned unchanged.
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let pad = width.saturating_sub(len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// `label` left-aligned to `width`, then `: value`.
pub fn format_row(label: &str, value: &str, width: usize) -> String {
    format!("{label:<width$}: {value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_row_pads_label() {
        assert_eq!(format_row("SSID", "home", 8), "SSID    : home");
        assert_eq!(format_row("Very long label", "x", 4), "Very long label: x");
    }

    #[test]
    fn test_center() {
        assert_eq!(center("ab", 6), "  ab");
        assert_eq!(center("abcdef", 4), "abcdef");
    }
}
