//! The fixed catalog of device report sections.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the captured output of a section's command is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Output is a JSON document.
    Json,
    /// Output is plain text, used verbatim after trimming.
    Text,
}

/// One section of the device report.
///
/// The order of [`SectionKind::ALL`] is the order the report is rendered in,
/// independent of which queries succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Device,
    Battery,
    Wifi,
    Storage,
    Volume,
    Brightness,
}

impl SectionKind {
    /// Every section, in render order.
    pub const ALL: [Self; 6] = [
        Self::Device,
        Self::Battery,
        Self::Wifi,
        Self::Storage,
        Self::Volume,
        Self::Brightness,
    ];

    /// Display title for the section header.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Device => "DEVICE INFO",
            Self::Battery => "BATTERY",
            Self::Wifi => "WIFI",
            Self::Storage => "STORAGE",
            Self::Volume => "VOLUME LEVELS",
            Self::Brightness => "BRIGHTNESS",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Device => "🔥",
            Self::Battery => "🔋",
            Self::Wifi => "📡",
            Self::Storage => "💾",
            Self::Volume => "🔊",
            Self::Brightness => "🔆",
        }
    }

    /// Termux utility queried for this section.
    pub const fn source(self) -> &'static str {
        match self {
            Self::Device => "termux-info",
            Self::Battery => "termux-battery-status",
            Self::Wifi => "termux-wifi-connectioninfo",
            Self::Storage => "termux-storage-get",
            Self::Volume => "termux-volume",
            Self::Brightness => "termux-brightness",
        }
    }

    pub const fn parse_mode(self) -> ParseMode {
        match self {
            Self::Brightness => ParseMode::Text,
            _ => ParseMode::Json,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device => write!(f, "device"),
            Self::Battery => write!(f, "battery"),
            Self::Wifi => write!(f, "wifi"),
            Self::Storage => write!(f, "storage"),
            Self::Volume => write!(f, "volume"),
            Self::Brightness => write!(f, "brightness"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_order_is_fixed() {
        let titles: Vec<&str> = SectionKind::ALL.iter().map(|k| k.title()).collect();
        assert_eq!(
            titles,
            [
                "DEVICE INFO",
                "BATTERY",
                "WIFI",
                "STORAGE",
                "VOLUME LEVELS",
                "BRIGHTNESS"
            ]
        );
    }

    #[test]
    fn test_only_brightness_is_text() {
        for kind in SectionKind::ALL {
            let expected = if kind == SectionKind::Brightness {
                ParseMode::Text
            } else {
                ParseMode::Json
            };
            assert_eq!(kind.parse_mode(), expected, "{kind}");
        }
    }

    #[test]
    fn test_sources_are_termux_utilities() {
        assert!(SectionKind::ALL.iter().all(|k| k.source().starts_with("termux-")));
    }
}
