use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default generation model when none is configured.
const DEFAULT_TEXT_MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub common: core_config::Config,
    pub anthropic: AnthropicSection,
    /// Present only when both synthesis credentials are set; `None`
    /// disables voice replies entirely.
    pub elevenlabs: Option<ElevenLabsSection>,
}

#[derive(Debug, Clone)]
pub struct AnthropicSection {
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct ElevenLabsSection {
    pub api_key: String,
    pub voice_id: String,
}

impl ChatConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let elevenlabs = match (
            env::var("ELEVENLABS_API_KEY"),
            env::var("ELEVENLABS_VOICE_ID"),
        ) {
            (Ok(api_key), Ok(voice_id)) if !api_key.is_empty() && !voice_id.is_empty() => {
                Some(ElevenLabsSection { api_key, voice_id })
            }
            _ => None,
        };

        Ok(ChatConfig {
            common: common_config,
            anthropic: AnthropicSection {
                api_key: get_env("ANTHROPIC_API_KEY", None, is_prod)?,
                model: get_env("ANTHROPIC_MODEL", Some(DEFAULT_TEXT_MODEL), is_prod)?,
            },
            elevenlabs,
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
