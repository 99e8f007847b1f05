use crate::models::{ChatRequest, ChatResponse};
use crate::startup::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use service_core::error::AppError;

/// `POST /api/chat`: generate a persona reply for the conversation and,
/// best-effort, its spoken rendering.
///
/// Body rejections (no JSON, missing `messages`, wrong shape) are turned
/// into a 400 before any provider call is made.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected chat request body");
        AppError::BadRequest(anyhow::anyhow!("Invalid messages format"))
    })?;

    let response = state.orchestrator.respond(&request.messages).await?;
    Ok(Json(response))
}

/// `OPTIONS /api/chat`: empty success. The CORS middleware stamps the
/// headers; provider logic is never touched.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any method other than POST/OPTIONS on the chat route.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
