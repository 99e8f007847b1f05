//! Router-level tests for the chat endpoint, driven with mock providers.
//!
//! No network access: requests go through `build_router` via
//! `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use base64::Engine as _;
use chat_service::config::{AnthropicSection, ChatConfig};
use chat_service::services::providers::mock::{MockSpeechSynthesizer, MockTextProvider};
use chat_service::services::providers::{SpeechSynthesizer, TextProvider};
use chat_service::services::ChatOrchestrator;
use chat_service::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_config() -> ChatConfig {
    ChatConfig {
        common: service_core::config::Config {
            port: 0,
            log_level: "info".to_string(),
        },
        anthropic: AnthropicSection {
            api_key: "test-api-key".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
        },
        elevenlabs: None,
    }
}

fn app(
    text: Arc<MockTextProvider>,
    speech: Option<Arc<MockSpeechSynthesizer>>,
) -> Router {
    let state = AppState {
        config: test_config(),
        orchestrator: ChatOrchestrator::new(
            text as Arc<dyn TextProvider>,
            speech.map(|s| s as Arc<dyn SpeechSynthesizer>),
        ),
    };
    build_router(state)
}

fn post_chat(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_messages_returns_400_without_provider_call() {
    let text = Arc::new(MockTextProvider::replying("unused"));
    let speech = Arc::new(MockSpeechSynthesizer::synthesizing(vec![1, 2, 3]));
    let router = app(text.clone(), Some(speech.clone()));

    let response = router
        .oneshot(post_chat(json!({ "prompt": "no messages field" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["error"].is_string());
    assert_eq!(text.calls(), 0);
    assert_eq!(speech.calls(), 0);
}

#[tokio::test]
async fn non_array_messages_returns_400_without_provider_call() {
    let text = Arc::new(MockTextProvider::replying("unused"));
    let router = app(text.clone(), None);

    let response = router
        .oneshot(post_chat(json!({ "messages": "not a sequence" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(text.calls(), 0);
}

#[tokio::test]
async fn non_json_body_returns_400() {
    let text = Arc::new(MockTextProvider::replying("unused"));
    let router = app(text.clone(), None);

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("not json at all"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(text.calls(), 0);
}

#[tokio::test]
async fn other_methods_return_405() {
    for method in ["GET", "PUT", "PATCH", "DELETE"] {
        let text = Arc::new(MockTextProvider::replying("unused"));
        let router = app(text.clone(), None);

        let response = router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/api/chat")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        let body = response_json(response).await;
        assert_eq!(body["error"], "Method not allowed");
        assert_eq!(text.calls(), 0, "{method}");
    }
}

#[tokio::test]
async fn options_returns_empty_success_with_cors_headers() {
    let text = Arc::new(MockTextProvider::replying("unused"));
    let router = app(text.clone(), None);

    let response = router
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/chat")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers().clone();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_METHODS],
        "GET,OPTIONS,PATCH,DELETE,POST,PUT"
    );
    assert!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .contains("X-CSRF-Token"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
    assert_eq!(text.calls(), 0);
}

#[tokio::test]
async fn generation_failure_returns_500_without_provider_content() {
    let text = Arc::new(MockTextProvider::failing(502));
    let router = app(text.clone(), None);

    let response = router
        .oneshot(post_chat(
            json!({ "messages": [{ "role": "user", "content": "Hello" }] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Internal server error");
    assert!(body["details"].as_str().unwrap().contains("502"));
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn unconfigured_synthesis_yields_null_audio() {
    let text = Arc::new(MockTextProvider::replying("Ah, a classic question."));
    let router = app(text.clone(), None);

    let response = router
        .oneshot(post_chat(
            json!({ "messages": [{ "role": "user", "content": "Hello" }] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Ah, a classic question.");
    assert!(body["audioUrl"].is_null());
    assert_eq!(text.calls(), 1);
}

#[tokio::test]
async fn synthesis_failure_still_returns_the_reply() {
    let text = Arc::new(MockTextProvider::replying("My worst investment? Next question."));
    let speech = Arc::new(MockSpeechSynthesizer::failing());
    let router = app(text.clone(), Some(speech.clone()));

    let response = router
        .oneshot(post_chat(
            json!({ "messages": [{ "role": "user", "content": "Hello" }] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "My worst investment? Next question.");
    assert!(body["audioUrl"].is_null());
    assert_eq!(speech.calls(), 1);
}

#[tokio::test]
async fn synthesis_success_embeds_audio_data_uri() {
    let audio = vec![0x49u8, 0x44, 0x33, 0x04];
    let text = Arc::new(MockTextProvider::replying("Purr."));
    let speech = Arc::new(MockSpeechSynthesizer::synthesizing(audio.clone()));
    let router = app(text, Some(speech));

    let response = router
        .oneshot(post_chat(
            json!({ "messages": [{ "role": "user", "content": "Hello" }] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    let audio_url = body["audioUrl"].as_str().unwrap();
    let payload = audio_url.strip_prefix("data:audio/mpeg;base64,").unwrap();
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .unwrap();
    assert_eq!(decoded, audio);
}

#[tokio::test]
async fn error_responses_carry_cors_headers() {
    let text = Arc::new(MockTextProvider::replying("unused"));
    let router = app(text, None);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/chat")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn chat_round_trip_shape() {
    // End-to-end shape check: valid generation credentials (mock), no
    // synthesis credentials.
    let text = Arc::new(MockTextProvider::replying(
        "Ah, my worst investment. A self-warming cardboard box startup. We called it a learning experience.",
    ));
    let router = app(text, None);

    let response = router
        .oneshot(post_chat(json!({
            "messages": [{ "role": "user", "content": "Pitch me your worst investment." }]
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );

    let body = response_json(response).await;
    assert!(!body["message"].as_str().unwrap().is_empty());
    assert!(body["audioUrl"].is_null());
}
