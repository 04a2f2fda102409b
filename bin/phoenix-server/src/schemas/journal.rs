use phoenix_core::store::JournalSummary;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /save_journal`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveJournalRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Response body for `POST /save_journal`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveJournalResponse {
    /// Always `"success"`.
    pub status: String,
    /// File name of the new entry, usable with `GET /get_journal/{id}`.
    pub id: String,
}

/// Response body for `GET /load_journals`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JournalListResponse {
    pub journals: Vec<JournalSummary>,
}

/// Response body for `GET /get_journal/{journal_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JournalContentResponse {
    pub content: String,
}
