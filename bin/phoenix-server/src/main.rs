//! phoenix-server – entry point.
//!
//! Startup order:
//! 1. Parse configuration from environment variables.
//! 2. Initialise structured tracing (JSON when `PHOENIX_LOG_JSON` is set).
//! 3. Build the Gemini client, shared by `serve` and `list-models`.
//!
//! `serve` then:
//! 4. Warns when no API key is configured.
//! 5. Opens the flat-file store and builds the shared state with the scorer.
//! 6. Builds the Axum router and starts the HTTP server with graceful shutdown.

mod config;
mod error;
mod middleware;
mod routes;
mod schemas;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use phoenix_core::{GeminiModel, VaderScorer};
use tracing::{info, warn};

use crate::config::Config;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "phoenix-server")]
#[command(about = "Chat, mood and journal backend for the Phoenix companion")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// List Gemini models that support generateContent for the configured key
    ListModels,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── 1. Configuration ───────────────────────────────────────────────────────
    let cfg = Config::from_env();

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    init_tracing(&cfg);

    // ── 3. Gemini client ───────────────────────────────────────────────────────
    let model = GeminiModel::new(
        cfg.gemini_api_key.clone(),
        cfg.gemini_model.clone(),
        cfg.gemini_base_url.clone(),
    );

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(cfg, model).await,
        Commands::ListModels => list_models(&model).await,
    }
}

fn init_tracing(cfg: &Config) {
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match cfg.log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: PHOENIX_LOG='{}' is not a valid tracing filter ({}); \
                     falling back to 'info'",
                    cfg.log_level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true);

    if cfg.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

async fn serve(cfg: Config, model: GeminiModel) -> anyhow::Result<()> {
    info!(version = env!("CARGO_PKG_VERSION"), "phoenix-server starting");

    // ── 4. API key check ───────────────────────────────────────────────────────
    if !model.has_api_key() {
        warn!("GEMINI_API_KEY is not set; chat replies will use the fallback message");
    }
    info!(model = model.model(), "generation model configured");

    // ── 5. Store, scorer and shared state ──────────────────────────────────────
    let addr: SocketAddr = cfg.bind_address.parse()?;
    let state = AppState::init(cfg, Arc::new(model), Arc::new(VaderScorer::new())).await?;
    let state = Arc::new(state);

    // ── 6. HTTP server with graceful shutdown ──────────────────────────────────
    let app = routes::build(Arc::clone(&state));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("phoenix-server stopped");
    Ok(())
}

async fn list_models(model: &GeminiModel) -> anyhow::Result<()> {
    match model.list_models().await {
        Ok(names) if names.is_empty() => {
            println!("No models supporting generateContent are available for this key.");
        }
        Ok(names) => {
            println!("Models supporting generateContent:");
            for name in names {
                println!("  {name}");
            }
        }
        Err(e) => {
            eprintln!("Failed to list models: {e}");
            return Err(e.into());
        }
    }
    Ok(())
}

/// Returns a future that resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
