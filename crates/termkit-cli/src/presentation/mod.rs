//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: report data is assembled in
//! `termkit-core`, and rendering here never runs queries.

pub mod report;
pub mod tables;

pub use report::{RenderOptions, render_report};
pub use tables::{center, format_row, rule};
