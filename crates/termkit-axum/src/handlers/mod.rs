//! HTTP handlers for the hub API.
//!
//! Handlers are thin: they extract request data, call into the upload
//! store or chat history, and broadcast the resulting [`HubEvent`].
//!
//! [`HubEvent`]: termkit_core::HubEvent

pub mod chat;
pub mod events;
pub mod files;
pub mod info;
