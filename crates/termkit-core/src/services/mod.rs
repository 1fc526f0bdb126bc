//! Core services built on top of the ports.

mod report_builder;

pub use report_builder::{ReportBuilder, extract_section};
