//! Liveness endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_health))]
pub struct HealthApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// `{"status": "ok", "version", "storage", "model_configured"}`.
///
/// `storage` is `"ok"` while all three collection directories exist and
/// `"missing"` otherwise. The server keeps answering either way.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is up", body = Value)
    )
)]
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let store = &state.store;
    let storage_ok = [store.mood_dir(), store.history_dir(), store.journal_dir()]
        .iter()
        .all(|dir| dir.is_dir());

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "storage": if storage_ok { "ok" } else { "missing" },
        "model_configured": state.config.gemini_api_key.is_some(),
    }))
}
