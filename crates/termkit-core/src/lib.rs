//! Core domain types and port definitions for termkit.
//!
//! This crate is pure: it owns the report model, the hub domain and the
//! port traits, but never spawns processes or opens sockets. Adapters
//! (`termkit-runtime`, `termkit-axum`, `termkit-cli`) provide the I/O.
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    ChatHistory, ChatMessage, Field, HubError, HubEvent, MAX_CHAT_HISTORY, PLACEHOLDER,
    ParseMode, PlatformInfo, QueryFailure, QueryOutcome, Report, ReportSection, SectionKind,
    SectionStatus, SharedFile, UploadedFile, content_type_for, sanitize_file_name,
    stored_file_name,
};
pub use ports::{
    CommandError, CommandOutput, CommandRunnerPort, CommandSpec, PlatformInfoPort,
};
pub use services::{ReportBuilder, extract_section};

// Silence unused dev-dependency warnings; mocks are generated via cfg_attr
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio as _;
