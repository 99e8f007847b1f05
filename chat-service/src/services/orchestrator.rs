//! The chat request flow: mandatory text generation followed by
//! best-effort speech synthesis.

use super::providers::{SpeechSynthesizer, TextProvider};
use crate::models::{ChatMessage, ChatResponse};
use crate::persona::FELIX_SYSTEM_PROMPT;
use base64::Engine as _;
use service_core::error::AppError;
use std::sync::Arc;

/// Upper bound on generated output tokens per reply.
pub const MAX_REPLY_TOKENS: u32 = 1024;

/// Coordinates the two upstream calls for one request. Holds no
/// per-request state; clones share the provider handles.
#[derive(Clone)]
pub struct ChatOrchestrator {
    text: Arc<dyn TextProvider>,
    speech: Option<Arc<dyn SpeechSynthesizer>>,
    system_prompt: &'static str,
}

impl ChatOrchestrator {
    /// `speech` is `None` when synthesis credentials are absent; the
    /// orchestrator then never attempts a synthesis call.
    pub fn new(text: Arc<dyn TextProvider>, speech: Option<Arc<dyn SpeechSynthesizer>>) -> Self {
        Self {
            text,
            speech,
            system_prompt: FELIX_SYSTEM_PROMPT,
        }
    }

    /// Produce the reply and, when possible, its spoken rendering.
    ///
    /// Generation failures propagate and fail the request. Synthesis
    /// failures are logged and swallowed: the text reply is already
    /// valid, and voice is a non-essential enhancement.
    pub async fn respond(&self, messages: &[ChatMessage]) -> Result<ChatResponse, AppError> {
        let message = self
            .text
            .generate(self.system_prompt, messages, MAX_REPLY_TOKENS)
            .await?;

        let audio_url = match &self.speech {
            Some(synthesizer) => match synthesizer.synthesize(&message).await {
                Ok(audio) => Some(audio_data_uri(&audio)),
                Err(e) => {
                    tracing::warn!(error = %e, "Speech synthesis failed, continuing without voice");
                    None
                }
            },
            None => None,
        };

        Ok(ChatResponse { message, audio_url })
    }
}

/// Embed encoded audio as a self-contained data URI usable directly as a
/// media source.
fn audio_data_uri(audio: &[u8]) -> String {
    format!(
        "data:audio/mpeg;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(audio)
    )
}
