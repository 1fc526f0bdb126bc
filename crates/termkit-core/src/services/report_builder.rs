//! Device report builder: query, parse with fallback, extract fields.
//!
//! Each section is independent. A failing query degrades only its own
//! section; the report always contains every [`SectionKind`] in order.

use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::{
    Field, PLACEHOLDER, QueryOutcome, Report, ReportSection, SectionKind, SectionStatus,
};
use crate::ports::{CommandRunnerPort, CommandSpec};

const UNKNOWN_DEVICE: &str = "Unknown Device";

/// Builds the device report against a [`CommandRunnerPort`].
pub struct ReportBuilder<'a> {
    runner: &'a dyn CommandRunnerPort,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(runner: &'a dyn CommandRunnerPort) -> Self {
        Self { runner }
    }

    /// Run the query behind one section.
    pub async fn query(&self, kind: SectionKind) -> QueryOutcome {
        let command = CommandSpec::new(kind.source());
        let result = self.runner.run(&command).await;
        let outcome = QueryOutcome::from_command(kind.parse_mode(), result);

        if let Some(failure) = outcome.failure() {
            debug!(section = %kind, command = %command, %failure, "query degraded");
        }
        outcome
    }

    /// Query every section strictly in sequence and assemble the report.
    pub async fn build(&self) -> Report {
        let mut sections = Vec::with_capacity(SectionKind::ALL.len());
        for kind in SectionKind::ALL {
            let outcome = self.query(kind).await;
            sections.push(extract_section(kind, &outcome));
        }
        Report { sections }
    }
}

/// Turn a query outcome into a section with fixed fields.
///
/// Absent keys render as [`PLACEHOLDER`]; unit suffixes attach only to
/// present values.
pub fn extract_section(kind: SectionKind, outcome: &QueryOutcome) -> ReportSection {
    let empty = Map::new();
    let map = outcome.object().unwrap_or(&empty);

    let fields = match kind {
        SectionKind::Device => vec![Field::new(
            "Model",
            lookup(map, "device_model").unwrap_or_else(|| UNKNOWN_DEVICE.to_string()),
        )],
        SectionKind::Battery => vec![
            Field::new("Percentage", suffixed(map, "percentage", "%")),
            Field::new("Charging", text(map, "plugged")),
            Field::new("Health", text(map, "health")),
        ],
        SectionKind::Wifi => vec![
            Field::new("SSID", text(map, "ssid")),
            Field::new("IP Address", text(map, "ip")),
            Field::new("Link Speed", suffixed(map, "link_speed", " Mbps")),
        ],
        SectionKind::Storage => storage_fields(map),
        SectionKind::Volume => volume_fields(outcome),
        SectionKind::Brightness => vec![Field::new("Level", brightness_level(outcome))],
    };

    ReportSection::new(kind)
        .with_fields(fields)
        .with_status(status_for(kind, outcome))
}

fn status_for(kind: SectionKind, outcome: &QueryOutcome) -> SectionStatus {
    let shape_ok = match (kind, outcome) {
        (_, QueryOutcome::Unavailable(failure)) => {
            return SectionStatus::Degraded {
                reason: failure.to_string(),
            };
        }
        (SectionKind::Brightness, _) => true,
        (SectionKind::Volume, QueryOutcome::Data(Value::Array(_))) => true,
        (_, QueryOutcome::Data(Value::Object(_))) => true,
        _ => false,
    };

    if shape_ok {
        SectionStatus::Ok
    } else {
        SectionStatus::Degraded {
            reason: "unexpected output shape".to_string(),
        }
    }
}

/// Render a JSON scalar for display. `null` counts as absent.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

fn lookup(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(display_value)
}

fn text(map: &Map<String, Value>, key: &str) -> String {
    lookup(map, key).unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn suffixed(map: &Map<String, Value>, key: &str, suffix: &str) -> String {
    lookup(map, key).map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v}{suffix}"))
}

fn storage_fields(map: &Map<String, Value>) -> Vec<Field> {
    if map.is_empty() {
        return vec![Field::placeholder("Details")];
    }
    map.iter()
        .map(|(key, value)| {
            Field::new(
                key.as_str(),
                display_value(value).unwrap_or_else(|| PLACEHOLDER.to_string()),
            )
        })
        .collect()
}

/// Volume streams arrive either keyed by stream name or as a list of
/// objects carrying a `stream` key.
fn volume_fields(outcome: &QueryOutcome) -> Vec<Field> {
    let streams: Vec<(&str, &Map<String, Value>)> = match outcome {
        QueryOutcome::Data(Value::Object(map)) => map
            .iter()
            .filter_map(|(name, levels)| levels.as_object().map(|l| (name.as_str(), l)))
            .collect(),
        QueryOutcome::Data(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|levels| {
                levels
                    .get("stream")
                    .and_then(Value::as_str)
                    .map(|name| (name, levels))
            })
            .collect(),
        _ => Vec::new(),
    };

    if streams.is_empty() {
        return vec![Field::placeholder("Streams")];
    }

    streams
        .into_iter()
        .map(|(name, levels)| {
            Field::new(
                capitalize(name),
                format!("{}/{}", text(levels, "volume"), text(levels, "max_volume")),
            )
        })
        .collect()
}

fn brightness_level(outcome: &QueryOutcome) -> String {
    match outcome {
        QueryOutcome::Text(level) => level.clone(),
        QueryOutcome::Data(value) => display_value(value).unwrap_or_else(|| PLACEHOLDER.to_string()),
        QueryOutcome::Unavailable(_) => PLACEHOLDER.to_string(),
    }
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}
