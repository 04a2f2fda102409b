//! Saved chat-session routes.
//!
//! Sessions are keyed by an id the client generates. There is no ownership
//! check: any caller may read or delete any session it can name.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use phoenix_core::store::{ChatTurn, HistoryStore, Sender, SessionSummary};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::history::{HistoryResponse, SaveChatRequest, SessionListResponse};
use crate::schemas::{ApiJson, StatusResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(save_chat, load_chat, get_chat_history, delete_chat),
    components(schemas(
        SaveChatRequest,
        SessionListResponse,
        HistoryResponse,
        SessionSummary,
        ChatTurn,
        Sender,
        StatusResponse
    ))
)]
pub struct HistoryApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/save_chat", post(save_chat))
        .route("/load_chat", get(load_chat))
        .route("/get_chat_history/{session_id}", get(get_chat_history))
        .route("/delete_chat/{session_id}", delete(delete_chat))
}

#[utoipa::path(
    post,
    path = "/save_chat",
    tag = "history",
    request_body = SaveChatRequest,
    responses(
        (status = 200, description = "Session saved", body = StatusResponse),
        (status = 400, description = "Missing session id or history of one turn or less"),
    )
)]
pub async fn save_chat(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SaveChatRequest>,
) -> Result<Json<StatusResponse>, ServerError> {
    let (Some(session_id), Some(history)) = (req.session_id, req.history) else {
        return Err(ServerError::BadRequest("Invalid data".into()));
    };
    state.store.save_history(&session_id, history).await?;
    Ok(Json(StatusResponse::success()))
}

#[utoipa::path(
    get,
    path = "/load_chat",
    tag = "history",
    responses(
        (status = 200, description = "Saved sessions", body = SessionListResponse),
        (status = 500, description = "Session files could not be read"),
    )
)]
pub async fn load_chat(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionListResponse>, ServerError> {
    let history = state.store.list_histories().await?;
    Ok(Json(SessionListResponse { history }))
}

#[utoipa::path(
    get,
    path = "/get_chat_history/{session_id}",
    tag = "history",
    params(("session_id" = String, Path, description = "Client-generated session id")),
    responses(
        (status = 200, description = "Full transcript", body = HistoryResponse),
        (status = 400, description = "Session id would escape the history directory"),
        (status = 404, description = "Not found"),
    )
)]
pub async fn get_chat_history(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, ServerError> {
    let history = state.store.get_history(&session_id).await?;
    Ok(Json(HistoryResponse { history }))
}

#[utoipa::path(
    delete,
    path = "/delete_chat/{session_id}",
    tag = "history",
    params(("session_id" = String, Path, description = "Client-generated session id")),
    responses(
        (status = 200, description = "Session deleted", body = StatusResponse),
        (status = 400, description = "Session id would escape the history directory"),
        (status = 404, description = "Not found"),
    )
)]
pub async fn delete_chat(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<StatusResponse>, ServerError> {
    state.store.delete_history(&session_id).await?;
    Ok(Json(StatusResponse::success()))
}
