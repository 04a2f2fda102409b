//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use phoenix_core::{ChatModel, FsStore, LlmGateway, SentimentScorer};

use crate::config::Config;

/// State shared across all HTTP handlers, built once at startup.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Mood, chat-history and journal files.
    pub store: Arc<FsStore>,
    /// Scores each chat message for the mood tracker.
    pub scorer: Arc<dyn SentimentScorer>,
    /// Persona-pinned relay to the generative model.
    pub gateway: LlmGateway,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Open the store under `config.data_dir` and create the static-asset
    /// directory. Both steps are idempotent.
    pub async fn init(
        config: Config,
        model: Arc<dyn ChatModel>,
        scorer: Arc<dyn SentimentScorer>,
    ) -> anyhow::Result<Self> {
        let store = FsStore::open(&config.data_dir).await?;
        tokio::fs::create_dir_all(&config.static_dir).await?;
        Ok(Self {
            config: Arc::new(config),
            store: Arc::new(store),
            scorer,
            gateway: LlmGateway::new(model),
        })
    }
}
