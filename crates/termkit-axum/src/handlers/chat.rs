//! Chat handlers.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use termkit_core::{ChatMessage, HubEvent};
use uuid::Uuid;

use crate::error::HttpError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    #[serde(default)]
    pub username: Option<String>,
    pub message: String,
}

pub async fn history(State(state): State<AppState>) -> Json<ChatHistoryResponse> {
    let messages = state.chat.read().await.messages();
    Json(ChatHistoryResponse { messages })
}

/// Append a message and broadcast it to every connected client.
pub async fn post(
    State(state): State<AppState>,
    Json(req): Json<PostMessageRequest>,
) -> Result<Json<ChatMessage>, HttpError> {
    let id = Uuid::new_v4().simple().to_string();
    let username = req
        .username
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("User_{}", &id[..4]));

    let message = ChatMessage::new(id, username, &req.message, Utc::now())?;
    state.chat.write().await.push(message.clone());
    state.sse.emit(HubEvent::ChatMessage {
        message: message.clone(),
    });

    Ok(Json(message))
}
