//! Report model produced by the report builder and consumed by renderers.

use serde::Serialize;

use super::section::SectionKind;

/// Value shown for any field whose data is absent.
pub const PLACEHOLDER: &str = "unknown";

/// A single label/value line of a report section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub label: String,
    pub value: String,
}

impl Field {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// A field whose value is [`PLACEHOLDER`].
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self::new(label, PLACEHOLDER)
    }

    pub fn is_placeholder(&self) -> bool {
        self.value == PLACEHOLDER
    }
}

/// Whether a section was built from real data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SectionStatus {
    Ok,
    /// The query failed or returned unusable data; fields hold placeholders.
    Degraded { reason: String },
}

/// One titled block of the report, sourced from one external query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub kind: SectionKind,
    pub title: String,
    pub source: String,
    pub fields: Vec<Field>,
    pub status: SectionStatus,
}

impl ReportSection {
    /// Create an empty, healthy section for `kind`.
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            source: kind.source().to_string(),
            fields: Vec::new(),
            status: SectionStatus::Ok,
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: SectionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.status, SectionStatus::Degraded { .. })
    }

    /// Look up a field value by its label.
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

/// The full device report, one section per [`SectionKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub sections: Vec<ReportSection>,
}

impl Report {
    pub fn section(&self, kind: SectionKind) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn degraded_count(&self) -> usize {
        self.sections.iter().filter(|s| s.is_degraded()).count()
    }
}
