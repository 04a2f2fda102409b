//! Mood tracker routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use phoenix_core::store::DailyMood;
use phoenix_core::store::mood::{MoodStore, label_score};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::mood::{LogMoodRequest, MoodDataResponse};
use crate::schemas::{ApiJson, StatusResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(log_mood, get_mood_data),
    components(schemas(LogMoodRequest, MoodDataResponse, DailyMood, StatusResponse))
)]
pub struct MoodApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/log_mood", post(log_mood))
        .route("/get_mood_data", get(get_mood_data))
}

/// Record a self-reported mood: happy 0.8, neutral 0.0, sad -0.8.
#[utoipa::path(
    post,
    path = "/log_mood",
    tag = "mood",
    request_body = LogMoodRequest,
    responses(
        (status = 200, description = "Mood recorded", body = StatusResponse),
        (status = 400, description = "Invalid mood"),
    )
)]
pub async fn log_mood(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LogMoodRequest>,
) -> Result<Json<StatusResponse>, ServerError> {
    let score = req
        .mood
        .as_deref()
        .and_then(label_score)
        .ok_or_else(|| ServerError::BadRequest("Invalid mood".into()))?;
    state.store.save_mood_score(score).await?;
    Ok(Json(StatusResponse::success()))
}

/// Daily average mood, oldest day first.
#[utoipa::path(
    get,
    path = "/get_mood_data",
    tag = "mood",
    responses(
        (status = 200, description = "Daily averages", body = MoodDataResponse),
        (status = 500, description = "Mood files could not be read"),
    )
)]
pub async fn get_mood_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MoodDataResponse>, ServerError> {
    let mood_data = state.store.mood_summary().await?;
    Ok(Json(MoodDataResponse { mood_data }))
}
