//! Wire types for the chat endpoint.

use serde::{Deserialize, Serialize};

/// Speaker of a conversation entry. The provider only accepts these two
/// roles; anything else is rejected at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Request body: the whole conversation, supplied by the caller on every
/// request. Nothing is persisted between requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// Response body. `audio_url` is a `data:audio/mpeg;base64,…` URI when
/// synthesis produced audio, and null both when synthesis is not
/// configured and when it failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    #[serde(rename = "audioUrl")]
    pub audio_url: Option<String>,
}
