//! Browser entry point.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use tracing::warn;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::state::AppState;

pub const INDEX_FILE: &str = "index.html";

#[derive(OpenApi)]
#[openapi(paths(index))]
pub struct PagesApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}

/// Serve `index.html` from the templates directory as-is.
#[utoipa::path(
    get,
    path = "/",
    tag = "pages",
    responses(
        (status = 200, description = "Single-page client", body = String, content_type = "text/html"),
        (status = 404, description = "No index page installed"),
    )
)]
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    let path = state.config.templates_dir.join(INDEX_FILE);
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Ok(Html(page)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "index page missing");
            Err(ServerError::NotFound("Not found".into()))
        }
        Err(e) => Err(ServerError::Internal(format!("reading {}: {e}", path.display()))),
    }
}
