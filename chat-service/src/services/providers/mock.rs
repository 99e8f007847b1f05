//! Mock provider implementations for testing.
//!
//! Each mock counts invocations so tests can assert that short-circuit
//! paths made no outbound call at all.

use super::{ProviderError, SpeechSynthesizer, TextProvider};
use crate::models::ChatMessage;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

enum TextBehavior {
    Reply(String),
    Fail(u16),
}

/// Mock text provider for testing.
pub struct MockTextProvider {
    behavior: TextBehavior,
    calls: AtomicUsize,
}

impl MockTextProvider {
    /// A provider that answers every conversation with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            behavior: TextBehavior::Reply(reply.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A provider that fails with the given upstream status.
    pub fn failing(status: u16) -> Self {
        Self {
            behavior: TextBehavior::Fail(status),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of generation calls made against this mock.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        _system: &str,
        _messages: &[ChatMessage],
        _max_tokens: u32,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            TextBehavior::Reply(reply) => Ok(reply.clone()),
            TextBehavior::Fail(status) => Err(ProviderError::ApiError {
                status: *status,
                message: "Mock text provider error".to_string(),
            }),
        }
    }
}

enum SpeechBehavior {
    Audio(Vec<u8>),
    Fail,
}

/// Mock speech synthesizer for testing.
pub struct MockSpeechSynthesizer {
    behavior: SpeechBehavior,
    calls: AtomicUsize,
}

impl MockSpeechSynthesizer {
    /// A synthesizer that returns the given audio bytes.
    pub fn synthesizing(audio: Vec<u8>) -> Self {
        Self {
            behavior: SpeechBehavior::Audio(audio),
            calls: AtomicUsize::new(0),
        }
    }

    /// A synthesizer that fails every call.
    pub fn failing() -> Self {
        Self {
            behavior: SpeechBehavior::Fail,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of synthesis calls made against this mock.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeechSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            SpeechBehavior::Audio(audio) => Ok(audio.clone()),
            SpeechBehavior::Fail => Err(ProviderError::NetworkError(
                "Mock speech synthesizer error".to_string(),
            )),
        }
    }
}
