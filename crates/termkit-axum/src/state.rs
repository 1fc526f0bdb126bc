//! Shared application state type.

use std::sync::Arc;

use termkit_core::ChatHistory;
use tokio::sync::RwLock;

use crate::sse::SseBroadcaster;
use crate::uploads::UploadStore;

/// Everything the hub handlers need.
#[derive(Debug)]
pub struct HubContext {
    pub uploads: UploadStore,
    pub chat: RwLock<ChatHistory>,
    pub sse: Arc<SseBroadcaster>,
    /// Port the server is listening on, used for share URLs.
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl HubContext {
    pub fn new(uploads: UploadStore, port: u16, max_upload_bytes: usize) -> Self {
        Self {
            uploads,
            chat: RwLock::new(ChatHistory::default()),
            sse: Arc::new(SseBroadcaster::with_defaults()),
            port,
            max_upload_bytes,
        }
    }
}

/// Application state shared across all handlers.
pub type AppState = Arc<HubContext>;
