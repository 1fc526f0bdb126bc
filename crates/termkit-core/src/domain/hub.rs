//! Hub domain: shared files, chat history and the events broadcast to clients.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of chat messages retained by default.
pub const MAX_CHAT_HISTORY: usize = 100;

/// Errors raised by hub domain rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    #[error("invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error("chat message is empty")]
    EmptyMessage,
}

/// A file currently stored in the hub upload directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedFile {
    pub name: String,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub content_type: String,
}

/// Result of storing one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Name on disk, unique within the upload directory.
    pub name: String,
    /// Name supplied by the client.
    pub original_name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub username: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Build a message, rejecting blank text.
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        message: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, HubError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(HubError::EmptyMessage);
        }
        Ok(Self {
            id: id.into(),
            username: username.into(),
            message: message.to_string(),
            timestamp,
        })
    }
}

/// Bounded chat history; the oldest message is evicted once full.
#[derive(Debug, Clone)]
pub struct ChatHistory {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl ChatHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        if self.capacity == 0 {
            return;
        }
        while self.messages.len() >= self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Snapshot of the history, oldest first.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new(MAX_CHAT_HISTORY)
    }
}

/// Events pushed to connected hub clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HubEvent {
    FileUploaded { file: UploadedFile },
    FilesUploaded { count: usize, files: Vec<UploadedFile> },
    FileDeleted { name: String },
    ChatMessage { message: ChatMessage },
}

/// Reduce a client-supplied name to a bare file name.
///
/// Directory components (either separator) are dropped so the result can
/// always be joined onto the upload directory safely.
pub fn sanitize_file_name(raw: &str) -> Result<String, HubError> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return Err(HubError::InvalidFileName(raw.to_string()));
    }
    Ok(cleaned.to_string())
}

/// Name under which an upload is stored: `{millis}-{nonce}-{original}`.
pub fn stored_file_name(original: &str, millis: i64, nonce: u32) -> Result<String, HubError> {
    let name = sanitize_file_name(original)?;
    Ok(format!("{millis}-{nonce}-{name}"))
}

/// Best-effort content type from a file extension.
pub fn content_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "txt" | "log" | "md" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "apk" => "application/vnd.android.package-archive",
        _ => "application/octet-stream",
    }
}
