use std::future::Future;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, warn};

use super::dao::{DailyMood, MoodEntry};
use super::{FsStore, sorted_names, write_atomic};
use crate::error::StoreError;

/// Score recorded for a self-reported mood button.
pub fn label_score(label: &str) -> Option<f64> {
    match label {
        "happy" => Some(0.8),
        "neutral" => Some(0.0),
        "sad" => Some(-0.8),
        _ => None,
    }
}

pub trait MoodStore: Send + Sync + 'static {
    /// Append `score` to today's mood file.
    fn save_mood_score(&self, score: f64) -> impl Future<Output = Result<(), StoreError>> + Send;
    /// Append `score` to the file of the day `at` falls on, stamped with `at`.
    fn save_mood_score_at(
        &self,
        score: f64,
        at: NaiveDateTime,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
    /// One average per day file, oldest day first.
    fn mood_summary(&self) -> impl Future<Output = Result<Vec<DailyMood>, StoreError>> + Send;
}

impl MoodStore for FsStore {
    async fn save_mood_score(&self, score: f64) -> Result<(), StoreError> {
        self.save_mood_score_at(score, Local::now().naive_local()).await
    }

    async fn save_mood_score_at(&self, score: f64, at: NaiveDateTime) -> Result<(), StoreError> {
        let path = self.mood_dir.join(format!("{}.json", at.format("%Y-%m-%d")));
        let _guard = self.mood_lock.lock().await;

        let mut entries: Vec<MoodEntry> = match tokio::fs::read(&path).await {
            Ok(raw) => serde_json::from_slice(&raw).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "corrupt mood file; starting a new list");
                Vec::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        entries.push(MoodEntry {
            timestamp: at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            score,
        });
        write_atomic(&path, &serde_json::to_vec_pretty(&entries)?).await?;
        debug!(day = %at.date(), entries = entries.len(), score, "mood score saved");
        Ok(())
    }

    async fn mood_summary(&self) -> Result<Vec<DailyMood>, StoreError> {
        let mut summary = Vec::new();
        for name in sorted_names(&self.mood_dir, ".json").await? {
            let raw = tokio::fs::read(self.mood_dir.join(&name)).await?;
            let entries: Vec<MoodEntry> = match serde_json::from_slice(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(file = %name, error = %e, "skipping corrupt mood file");
                    continue;
                }
            };
            if entries.is_empty() {
                continue;
            }
            let avg = entries.iter().map(|e| e.score).sum::<f64>() / entries.len() as f64;
            summary.push(DailyMood {
                timestamp: name.trim_end_matches(".json").to_owned(),
                avg_mood: avg,
            });
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn day_file(store: &FsStore, day: &str) -> Vec<MoodEntry> {
        let raw = std::fs::read(store.mood_dir().join(format!("{day}.json"))).unwrap();
        serde_json::from_slice(&raw).unwrap()
    }

    #[test]
    fn mood_labels_map_to_fixed_scores() {
        assert_eq!(label_score("happy"), Some(0.8));
        assert_eq!(label_score("neutral"), Some(0.0));
        assert_eq!(label_score("sad"), Some(-0.8));
        assert_eq!(label_score("Happy"), None);
        assert_eq!(label_score("angry"), None);
    }

    #[tokio::test]
    async fn same_day_saves_append() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsStore::open(tmp.path()).await.unwrap();

        store.save_mood_score_at(0.8, at(1, 9)).await.unwrap();
        store.save_mood_score_at(-0.4, at(1, 18)).await.unwrap();

        let entries = day_file(&store, "2024-05-01");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].score, 0.8);
        assert_eq!(entries[0].timestamp, "2024-05-01T09:00:00.000000");
        assert_eq!(entries[1].score, -0.4);

        let summary = store.mood_summary().await.unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].timestamp, "2024-05-01");
        assert!((summary[0].avg_mood - 0.2).abs() < 1e-9);
    }

    #[tokio::test]
    async fn single_entry_average_is_the_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsStore::open(tmp.path()).await.unwrap();
        store.save_mood_score(0.8).await.unwrap();

        let summary = store.mood_summary().await.unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].avg_mood, 0.8);
    }

    #[tokio::test]
    async fn summary_is_chronological_and_skips_empty_days() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsStore::open(tmp.path()).await.unwrap();
        store.save_mood_score_at(0.5, at(3, 10)).await.unwrap();
        store.save_mood_score_at(-0.5, at(1, 10)).await.unwrap();
        std::fs::write(store.mood_dir().join("2024-05-02.json"), "[]").unwrap();

        let days: Vec<_> = store
            .mood_summary()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.timestamp)
            .collect();
        assert_eq!(days, vec!["2024-05-01", "2024-05-03"]);
    }

    #[tokio::test]
    async fn corrupt_day_file_is_reset_before_append() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsStore::open(tmp.path()).await.unwrap();
        std::fs::write(store.mood_dir().join("2024-05-01.json"), "{not json").unwrap();

        // Corrupt files are left out of the summary until rewritten.
        assert!(store.mood_summary().await.unwrap().is_empty());

        store.save_mood_score_at(0.0, at(1, 12)).await.unwrap();
        assert_eq!(day_file(&store, "2024-05-01").len(), 1);
    }

    #[tokio::test]
    async fn concurrent_saves_are_not_lost() {
        let tmp = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(FsStore::open(tmp.path()).await.unwrap());

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.save_mood_score_at(i as f64 / 16.0, at(4, 8)).await
            }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }
        assert_eq!(day_file(&store, "2024-05-04").len(), 16);
    }
}
