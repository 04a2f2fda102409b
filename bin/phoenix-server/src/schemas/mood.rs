use phoenix_core::store::DailyMood;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /log_mood`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogMoodRequest {
    /// One of `"happy"`, `"neutral"`, `"sad"`.
    #[serde(default)]
    pub mood: Option<String>,
}

/// Response body for `GET /get_mood_data`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MoodDataResponse {
    pub mood_data: Vec<DailyMood>,
}
