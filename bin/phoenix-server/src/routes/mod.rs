//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace-ID injection)
//! - Chat, mood, chat-history and journal JSON endpoints
//! - Index page and `/static` assets
//! - Health route and the optional OpenAPI document
//!   (disable with `PHOENIX_ENABLE_API_DOCS=false`)

mod chat;
pub mod doc;
mod health;
mod history;
mod journal;
mod mood;
mod pages;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router, middleware};
use tower_http::services::ServeDir;

use crate::middleware::{cors, trace};
use crate::state::AppState;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .merge(pages::router())
        .merge(health::router())
        .merge(chat::router())
        .merge(mood::router())
        .merge(history::router())
        .merge(journal::router())
        .nest_service("/static", ServeDir::new(&state.config.static_dir));

    if state.config.enable_api_docs {
        app = app.route("/api-docs/openapi.json", get(|| async { Json(doc::get_docs()) }));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(cors::cors_layer(&state))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            trace::trace_middleware,
        ))
        .with_state(state)
}


#[cfg(test)]
mod test {
    use super::testing::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn responses_carry_a_trace_id() {
        let tmp = tempfile::tempdir().unwrap();
        let (app, _) = app(tmp.path(), FakeModel::replying("ok")).await;
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(crate::middleware::trace::X_TRACE_ID));
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let tmp = tempfile::tempdir().unwrap();
        let (app, _) = app(tmp.path(), FakeModel::replying("ok")).await;
        let (status, body) = call(&app, "GET", "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/chat"].is_object());
        assert!(body["paths"]["/delete_journal/{journal_id}"].is_object());
    }

    #[tokio::test]
    async fn static_assets_are_served() {
        let tmp = tempfile::tempdir().unwrap();
        let (app, state) = app(tmp.path(), FakeModel::replying("ok")).await;
        std::fs::write(state.config.static_dir.join("app.js"), "console.log(1)").unwrap();

        let response = app
            .oneshot(Request::get("/static/app.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
