//! Domain types shared by every termkit adapter.
//!
//! - `section`: the fixed catalog of device report sections
//! - `query`: the outcome of one external query
//! - `report`: the rendered-agnostic report model
//! - `hub`: shared files, chat history and hub events
//! - `platform`: static platform metadata for the smoke test

mod hub;
mod platform;
mod query;
mod report;
mod section;

pub use hub::{
    ChatHistory, ChatMessage, HubError, HubEvent, MAX_CHAT_HISTORY, SharedFile, UploadedFile,
    content_type_for, sanitize_file_name, stored_file_name,
};
pub use platform::PlatformInfo;
pub use query::{QueryFailure, QueryOutcome};
pub use report::{Field, PLACEHOLDER, Report, ReportSection, SectionStatus};
pub use section::{ParseMode, SectionKind};
