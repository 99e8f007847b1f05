//! Application startup and lifecycle management.
//!
//! Binds the HTTP listener (port 0 yields a random port for tests),
//! wires the router, and owns provider construction from configuration.

use crate::config::ChatConfig;
use crate::handlers;
use crate::services::providers::anthropic::{AnthropicConfig, AnthropicTextProvider};
use crate::services::providers::elevenlabs::{ElevenLabsConfig, ElevenLabsSynthesizer};
use crate::services::providers::{SpeechSynthesizer, TextProvider};
use crate::services::ChatOrchestrator;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{cors::cors_middleware, tracing::request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state. Configuration plus provider handles; no
/// conversation data survives a request.
#[derive(Clone)]
pub struct AppState {
    pub config: ChatConfig,
    pub orchestrator: ChatOrchestrator,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ChatConfig) -> Result<Self, AppError> {
        let text_provider: Arc<dyn TextProvider> =
            Arc::new(AnthropicTextProvider::new(AnthropicConfig {
                api_key: config.anthropic.api_key.clone(),
                model: config.anthropic.model.clone(),
            }));

        tracing::info!(
            model = %config.anthropic.model,
            "Initialized text generation provider"
        );

        let speech_synthesizer: Option<Arc<dyn SpeechSynthesizer>> = match &config.elevenlabs {
            Some(section) => {
                tracing::info!(voice = %section.voice_id, "Initialized speech synthesizer");
                Some(Arc::new(ElevenLabsSynthesizer::new(
                    ElevenLabsConfig::from_credentials(
                        section.api_key.clone(),
                        section.voice_id.clone(),
                    ),
                )))
            }
            None => {
                tracing::info!("Synthesis credentials absent, voice replies disabled");
                None
            }
        };

        let state = AppState {
            config: config.clone(),
            orchestrator: ChatOrchestrator::new(text_provider, speech_synthesizer),
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router).await
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/chat",
            post(handlers::chat)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )
        .route("/health", get(handlers::health_check))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(cors_middleware))
}
