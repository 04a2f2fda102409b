use std::future::Future;

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use super::dao::{JournalSummary, PREVIEW_CHARS};
use super::{FsStore, check_id, not_found_as, sorted_names};
use crate::error::StoreError;

pub trait JournalStore: Send + Sync + 'static {
    /// Write `text` to a new timestamp-named file and return its id.
    fn save_journal(&self, text: &str) -> impl Future<Output = Result<String, StoreError>> + Send;
    fn save_journal_at(
        &self,
        text: &str,
        at: NaiveDateTime,
    ) -> impl Future<Output = Result<String, StoreError>> + Send;
    /// All journals, newest first, with a short preview.
    fn list_journals(&self) -> impl Future<Output = Result<Vec<JournalSummary>, StoreError>> + Send;
    fn get_journal(&self, id: &str) -> impl Future<Output = Result<String, StoreError>> + Send;
    fn delete_journal(&self, id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// `journal_YYYY-MM-DD_HH-MM-SS.txt`; lexical order is chronological.
pub fn journal_file_name(at: NaiveDateTime) -> String {
    format!("journal_{}.txt", at.format("%Y-%m-%d_%H-%M-%S"))
}

impl JournalStore for FsStore {
    async fn save_journal(&self, text: &str) -> Result<String, StoreError> {
        self.save_journal_at(text, Local::now().naive_local()).await
    }

    async fn save_journal_at(&self, text: &str, at: NaiveDateTime) -> Result<String, StoreError> {
        if text.is_empty() {
            return Err(StoreError::InvalidData("No text".into()));
        }
        // Two saves within one second share a name; the later one wins.
        let id = journal_file_name(at);
        tokio::fs::write(self.journal_dir.join(&id), text).await?;
        debug!(id = %id, len = text.len(), "journal saved");
        Ok(id)
    }

    async fn list_journals(&self) -> Result<Vec<JournalSummary>, StoreError> {
        let mut names = sorted_names(&self.journal_dir, ".txt").await?;
        names.reverse();

        let mut journals = Vec::with_capacity(names.len());
        for name in names {
            let raw = tokio::fs::read(self.journal_dir.join(&name)).await?;
            let preview = String::from_utf8_lossy(&raw)
                .chars()
                .take(PREVIEW_CHARS)
                .collect();
            journals.push(JournalSummary { id: name, preview });
        }
        Ok(journals)
    }

    async fn get_journal(&self, id: &str) -> Result<String, StoreError> {
        check_id(id)?;
        tokio::fs::read_to_string(self.journal_dir.join(id))
            .await
            .map_err(not_found_as(id))
    }

    async fn delete_journal(&self, id: &str) -> Result<(), StoreError> {
        check_id(id)?;
        tokio::fs::remove_file(self.journal_dir.join(id))
            .await
            .map_err(not_found_as(id))?;
        debug!(id, "journal deleted");
        Ok(())
    }
}
