//! ElevenLabs text-to-speech provider.
//!
//! Renders a reply to MPEG audio via `/v1/text-to-speech/{voice_id}`.
//! All failures here are contained by the orchestrator; this provider
//! only reports them.

use super::{ProviderError, SpeechSynthesizer};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Serialize;

/// ElevenLabs API base URL.
const ELEVENLABS_API_BASE: &str = "https://api.elevenlabs.io/v1";

/// Fixed synthesis settings, matching the voice the persona ships with.
const DEFAULT_MODEL_ID: &str = "eleven_monolingual_v1";
const DEFAULT_STABILITY: f32 = 0.5;
const DEFAULT_SIMILARITY_BOOST: f32 = 0.75;

/// ElevenLabs provider configuration.
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    pub api_key: String,
    pub voice_id: String,
    pub model_id: String,
    pub stability: f32,
    pub similarity_boost: f32,
}

impl ElevenLabsConfig {
    /// Configuration from credentials alone, with the fixed voice
    /// settings applied.
    pub fn from_credentials(api_key: String, voice_id: String) -> Self {
        Self {
            api_key,
            voice_id,
            model_id: DEFAULT_MODEL_ID.to_string(),
            stability: DEFAULT_STABILITY,
            similarity_boost: DEFAULT_SIMILARITY_BOOST,
        }
    }
}

/// ElevenLabs speech synthesizer.
pub struct ElevenLabsSynthesizer {
    config: ElevenLabsConfig,
    client: Client,
}

impl ElevenLabsSynthesizer {
    pub fn new(config: ElevenLabsConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        let request = SynthesisRequest {
            text,
            model_id: &self.config.model_id,
            voice_settings: VoiceSettings {
                stability: self.config.stability,
                similarity_boost: self.config.similarity_boost,
            },
        };

        tracing::debug!(
            voice = %self.config.voice_id,
            text_len = text.len(),
            "Sending request to ElevenLabs API"
        );

        let response = self
            .client
            .post(format!(
                "{}/text-to-speech/{}",
                ELEVENLABS_API_BASE, self.config.voice_id
            ))
            .header(header::ACCEPT, "audio/mpeg")
            .header("xi-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %error_text, "ElevenLabs API error");

            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: "ElevenLabs API error".to_string(),
            });
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        Ok(audio.to_vec())
    }
}

// ============================================================================
// ElevenLabs API Request Types
// ============================================================================

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}
