use phoenix_core::store::{ChatTurn, SessionSummary};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /save_chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveChatRequest {
    /// Client-generated session id.
    #[serde(default)]
    pub session_id: Option<String>,
    /// The whole transcript; must hold more than one turn.
    #[serde(default)]
    pub history: Option<Vec<ChatTurn>>,
}

/// Response body for `GET /load_chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionListResponse {
    pub history: Vec<SessionSummary>,
}

/// Response body for `GET /get_chat_history/{session_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    pub history: Vec<ChatTurn>,
}
