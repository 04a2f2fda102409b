//! Server configuration, loaded from environment variables at startup.

use std::path::PathBuf;

use phoenix_core::gateway::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Runtime configuration for phoenix-server.
///
/// Every field has a default so the server starts without any environment
/// variables set; only replies from the model need `GEMINI_API_KEY`.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"127.0.0.1:5000"`).
    pub bind_address: String,

    /// Root holding `history/`, `journals/` and `mood_data/` (default: `"."`).
    pub data_dir: PathBuf,

    /// Directory served under `/static` (default: `"static"`).
    pub static_dir: PathBuf,

    /// Directory holding `index.html` (default: `"templates"`).
    pub templates_dir: PathBuf,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated list of allowed CORS origins; `None` allows any.
    pub cors_allowed_origins: Option<String>,

    /// Serve the OpenAPI document at `/api-docs/openapi.json`.
    pub enable_api_docs: bool,

    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("PHOENIX_BIND", "127.0.0.1:5000"),
            data_dir: env_or("PHOENIX_DATA_DIR", ".").into(),
            static_dir: env_or("PHOENIX_STATIC_DIR", "static").into(),
            templates_dir: env_or("PHOENIX_TEMPLATES_DIR", "templates").into(),
            log_level: env_or("PHOENIX_LOG", "info"),
            log_json: parse_bool("PHOENIX_LOG_JSON", false),
            cors_allowed_origins: std::env::var("PHOENIX_CORS_ORIGINS").ok(),
            enable_api_docs: parse_bool("PHOENIX_ENABLE_API_DOCS", true),
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            gemini_model: env_or("PHOENIX_GEMINI_MODEL", DEFAULT_MODEL),
            gemini_base_url: env_or("PHOENIX_GEMINI_BASE_URL", DEFAULT_BASE_URL),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

#[cfg(test)]
impl Config {
    /// Defaults rooted at `dir`, independent of the process environment.
    pub fn for_tests(dir: &std::path::Path) -> Self {
        Self {
            bind_address: "127.0.0.1:0".into(),
            data_dir: dir.to_path_buf(),
            static_dir: dir.join("static"),
            templates_dir: dir.join("templates"),
            log_level: "debug".into(),
            log_json: false,
            cors_allowed_origins: None,
            enable_api_docs: true,
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.into(),
            gemini_base_url: DEFAULT_BASE_URL.into(),
        }
    }
}
