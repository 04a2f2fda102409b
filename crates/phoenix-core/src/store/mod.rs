//! Flat-file persistence.
//!
//! [`FsStore`] owns three sibling directories under the data root, one per
//! collection:
//!
//! | directory    | one file per   | format                     |
//! |--------------|----------------|----------------------------|
//! | `mood_data/` | calendar day   | JSON array of mood entries |
//! | `history/`   | chat session   | JSON object                |
//! | `journals/`  | journal entry  | plain text                 |
//!
//! Each collection is exposed through its own trait ([`MoodStore`],
//! [`HistoryStore`], [`JournalStore`]) so handlers depend only on the
//! operations they use. All trait methods use `impl Future` in their
//! signatures, no `async-trait` needed.

pub mod dao;
pub mod history;
pub mod journal;
pub mod mood;

pub use dao::{ChatSession, ChatTurn, DailyMood, JournalSummary, MoodEntry, Sender, SessionSummary};
pub use history::HistoryStore;
pub use journal::JournalStore;
pub use mood::MoodStore;

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::info;

use crate::error::StoreError;

pub const MOOD_DIR: &str = "mood_data";
pub const HISTORY_DIR: &str = "history";
pub const JOURNAL_DIR: &str = "journals";

#[derive(Debug)]
pub struct FsStore {
    mood_dir: PathBuf,
    history_dir: PathBuf,
    journal_dir: PathBuf,
    /// Serializes the read-modify-write cycle on the day's mood file.
    mood_lock: Mutex<()>,
}

impl FsStore {
    /// Create (if needed) the three collection directories under `root`.
    ///
    /// Safe to call on every startup; existing files are left untouched.
    pub async fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref();
        let store = Self {
            mood_dir: root.join(MOOD_DIR),
            history_dir: root.join(HISTORY_DIR),
            journal_dir: root.join(JOURNAL_DIR),
            mood_lock: Mutex::new(()),
        };
        for dir in [&store.mood_dir, &store.history_dir, &store.journal_dir] {
            tokio::fs::create_dir_all(dir).await?;
        }
        info!(root = %root.display(), "file store ready");
        Ok(store)
    }

    pub fn mood_dir(&self) -> &Path {
        &self.mood_dir
    }

    pub fn history_dir(&self) -> &Path {
        &self.history_dir
    }

    pub fn journal_dir(&self) -> &Path {
        &self.journal_dir
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

/// Reject ids that could resolve outside their collection directory, or to
/// the directory itself or a hidden temp file inside it.
pub(crate) fn check_id(id: &str) -> Result<(), StoreError> {
    if id.is_empty() || id.starts_with('.') || id.contains("..") || id.contains(['/', '\\']) {
        return Err(StoreError::InvalidId(id.to_owned()));
    }
    Ok(())
}

/// File names in `dir` ending with `suffix`, sorted ascending.
pub(crate) async fn sorted_names(dir: &Path, suffix: &str) -> Result<Vec<String>, StoreError> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(suffix) && !name.starts_with('.') {
                names.push(name.to_owned());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Replace `path` with `contents` via a sibling temp file and a rename, so
/// readers see either the old or the new file.
pub(crate) async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| StoreError::InvalidId(path.display().to_string()))?;
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));
    tokio::fs::write(&tmp, contents).await?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

/// Map a missing-file I/O error to [`StoreError::NotFound`].
pub(crate) fn not_found_as(id: &str) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound(id.to_owned())
        } else {
            StoreError::Io(e)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn open_creates_directories_idempotently() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsStore::open(tmp.path()).await.unwrap();
        assert!(store.mood_dir().is_dir());
        assert!(store.history_dir().is_dir());
        assert!(store.journal_dir().is_dir());

        std::fs::write(store.journal_dir().join("keep.txt"), "still here").unwrap();
        let again = FsStore::open(tmp.path()).await.unwrap();
        assert!(again.journal_dir().join("keep.txt").exists());
    }

    #[test]
    fn check_id_rejects_traversal() {
        for bad in ["", ".", "..", ".json", "../x", "a..b", "/etc/passwd", "a/b", "a\\b"] {
            assert!(check_id(bad).is_err(), "expected '{bad}' to be rejected");
        }
        assert!(check_id("journal_2024-05-01_10-00-00.txt").is_ok());
        assert!(check_id("1714557600000").is_ok());
    }

    #[tokio::test]
    async fn sorted_names_filters_suffix_and_temp_files() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["b.json", "a.json", "notes.txt", ".a.json.tmp"] {
            std::fs::write(tmp.path().join(name), "[]").unwrap();
        }
        let names = sorted_names(tmp.path(), ".json").await.unwrap();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[tokio::test]
    async fn write_atomic_replaces_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("s.json");
        write_atomic(&path, b"one").await.unwrap();
        write_atomic(&path, b"two").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "two");
        assert!(!tmp.path().join(".s.json.tmp").exists());
    }
}
