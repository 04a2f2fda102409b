use std::future::Future;

use chrono::Local;
use serde::Deserialize;
use tracing::{debug, warn};

use super::dao::{ChatSession, ChatTurn, SessionSummary, UNTITLED};
use super::{FsStore, check_id, not_found_as, sorted_names, write_atomic};
use crate::error::StoreError;

pub trait HistoryStore: Send + Sync + 'static {
    /// Create or overwrite the session file. Requires more than one turn.
    fn save_history(
        &self,
        session_id: &str,
        history: Vec<ChatTurn>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
    fn list_histories(&self) -> impl Future<Output = Result<Vec<SessionSummary>, StoreError>> + Send;
    fn get_history(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<Vec<ChatTurn>, StoreError>> + Send;
    fn delete_history(&self, session_id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Just the title, for listing without decoding whole transcripts.
#[derive(Deserialize)]
struct TitleOnly {
    title: Option<String>,
}

#[derive(Deserialize)]
struct HistoryOnly {
    #[serde(default)]
    history: Vec<ChatTurn>,
}

impl HistoryStore for FsStore {
    async fn save_history(&self, session_id: &str, history: Vec<ChatTurn>) -> Result<(), StoreError> {
        if session_id.is_empty() || history.len() <= 1 {
            return Err(StoreError::InvalidData("Invalid data".into()));
        }
        check_id(session_id)?;

        let session = ChatSession {
            title: ChatSession::derive_title(&history),
            history,
            timestamp: Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        };
        let path = self.history_dir.join(format!("{session_id}.json"));
        write_atomic(&path, &serde_json::to_vec_pretty(&session)?).await?;
        debug!(session_id, turns = session.history.len(), "chat history saved");
        Ok(())
    }

    async fn list_histories(&self) -> Result<Vec<SessionSummary>, StoreError> {
        let mut sessions = Vec::new();
        for name in sorted_names(&self.history_dir, ".json").await? {
            let raw = tokio::fs::read(self.history_dir.join(&name)).await?;
            let title = match serde_json::from_slice::<TitleOnly>(&raw) {
                Ok(t) => t.title.unwrap_or_else(|| UNTITLED.to_owned()),
                Err(e) => {
                    warn!(file = %name, error = %e, "skipping unreadable session file");
                    continue;
                }
            };
            sessions.push(SessionSummary {
                id: name.trim_end_matches(".json").to_owned(),
                title,
            });
        }
        Ok(sessions)
    }

    async fn get_history(&self, session_id: &str) -> Result<Vec<ChatTurn>, StoreError> {
        check_id(session_id)?;
        let path = self.history_dir.join(format!("{session_id}.json"));
        let raw = tokio::fs::read(&path).await.map_err(not_found_as(session_id))?;
        let stored: HistoryOnly = serde_json::from_slice(&raw)?;
        Ok(stored.history)
    }

    async fn delete_history(&self, session_id: &str) -> Result<(), StoreError> {
        check_id(session_id)?;
        let path = self.history_dir.join(format!("{session_id}.json"));
        tokio::fs::remove_file(&path)
            .await
            .map_err(not_found_as(session_id))?;
        debug!(session_id, "chat history deleted");
        Ok(())
    }
}
