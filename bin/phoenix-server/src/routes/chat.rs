//! Chat relay route.
//!
//! Every message is scored for the mood tracker before anything else. A
//! message that trips a safety override is answered with the crisis-resource
//! message and never reaches the model.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use phoenix_core::safety::{self, SAFETY_MESSAGE};
use phoenix_core::store::MoodStore;
use tracing::{debug, info, warn};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::ApiJson;
use crate::schemas::chat::{ChatRequest, ChatResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(chat), components(schemas(ChatRequest, ChatResponse)))]
pub struct ChatApi;

/// Register chat routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/chat", post(chat))
}

#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Reply generated", body = ChatResponse),
        (status = 400, description = "No message provided"),
    )
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ServerError> {
    let message = req
        .message
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ServerError::BadRequest("No message provided".into()))?;

    let score = state.scorer.score(&message);
    debug!(score, "message scored");
    state
        .store
        .save_mood_score(score)
        .await
        .unwrap_or_else(|e| warn!(error = %e, "failed to record chat mood score"));

    let verdict = safety::classify(&message);
    if verdict.intercepts() {
        info!(?verdict, "safety override answered the message");
        return Ok(Json(ChatResponse { response: SAFETY_MESSAGE.to_owned() }));
    }

    let response = state.gateway.respond(&message).await;
    Ok(Json(ChatResponse { response }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
