//! Upstream provider abstractions and implementations.
//!
//! The orchestrator depends on these traits rather than concrete API
//! clients, so the flow is testable with the mocks in [`mock`].

pub mod anthropic;
pub mod elevenlabs;
pub mod mock;

use crate::models::ChatMessage;
use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("{message} ({status})")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Failures on the mandatory generation path become request failures.
/// An upstream non-success status keeps its status code in the details;
/// everything else is an internal error.
impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::ApiError { status, message } => AppError::Upstream { status, message },
            other => AppError::InternalError(anyhow::Error::new(other)),
        }
    }
}

/// Trait for conversation-in, reply-out text generation.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a reply for the conversation under the given system
    /// instruction, bounded to `max_tokens` output tokens.
    async fn generate(
        &self,
        system: &str,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, ProviderError>;
}

/// Trait for text-to-speech rendering. Returns encoded audio bytes
/// (MPEG); the caller decides how to package them.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ProviderError>;
}
