//! Journal routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use phoenix_core::store::{JournalStore, JournalSummary};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::journal::{
    JournalContentResponse, JournalListResponse, SaveJournalRequest, SaveJournalResponse,
};
use crate::schemas::{ApiJson, StatusResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(save_journal, load_journals, get_journal, delete_journal),
    components(schemas(
        SaveJournalRequest,
        SaveJournalResponse,
        JournalListResponse,
        JournalContentResponse,
        JournalSummary,
        StatusResponse
    ))
)]
pub struct JournalApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/save_journal", post(save_journal))
        .route("/load_journals", get(load_journals))
        .route("/get_journal/{journal_id}", get(get_journal))
        .route("/delete_journal/{journal_id}", delete(delete_journal))
}

/// Store a new entry named after the current local time.
#[utoipa::path(
    post,
    path = "/save_journal",
    tag = "journal",
    request_body = SaveJournalRequest,
    responses(
        (status = 200, description = "Entry saved", body = SaveJournalResponse),
        (status = 400, description = "No text"),
    )
)]
pub async fn save_journal(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SaveJournalRequest>,
) -> Result<Json<SaveJournalResponse>, ServerError> {
    let text = req
        .text
        .ok_or_else(|| ServerError::BadRequest("No text".into()))?;
    let id = state.store.save_journal(&text).await?;
    Ok(Json(SaveJournalResponse { status: "success".into(), id }))
}

/// Newest entry first, each with a 100-character preview.
#[utoipa::path(
    get,
    path = "/load_journals",
    tag = "journal",
    responses(
        (status = 200, description = "Journal entries", body = JournalListResponse),
        (status = 500, description = "Journal files could not be read"),
    )
)]
pub async fn load_journals(
    State(state): State<Arc<AppState>>,
) -> Result<Json<JournalListResponse>, ServerError> {
    let journals = state.store.list_journals().await?;
    Ok(Json(JournalListResponse { journals }))
}

#[utoipa::path(
    get,
    path = "/get_journal/{journal_id}",
    tag = "journal",
    params(("journal_id" = String, Path, description = "Journal file name")),
    responses(
        (status = 200, description = "Full entry text", body = JournalContentResponse),
        (status = 400, description = "Invalid filename"),
        (status = 404, description = "Not found"),
    )
)]
pub async fn get_journal(
    State(state): State<Arc<AppState>>,
    Path(journal_id): Path<String>,
) -> Result<Json<JournalContentResponse>, ServerError> {
    let content = state.store.get_journal(&journal_id).await?;
    Ok(Json(JournalContentResponse { content }))
}

#[utoipa::path(
    delete,
    path = "/delete_journal/{journal_id}",
    tag = "journal",
    params(("journal_id" = String, Path, description = "Journal file name")),
    responses(
        (status = 200, description = "Entry deleted", body = StatusResponse),
        (status = 400, description = "Invalid filename"),
        (status = 404, description = "Not found"),
    )
)]
pub async fn delete_journal(
    State(state): State<Arc<AppState>>,
    Path(journal_id): Path<String>,
) -> Result<Json<StatusResponse>, ServerError> {
    state.store.delete_journal(&journal_id).await?;
    Ok(Json(StatusResponse::success()))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::testing::{FakeModel, app, call};

    #[tokio::test]
    async fn save_load_get_delete_cycle() {
        let tmp = tempfile::tempdir().unwrap();
        let (app, _) = app(tmp.path(), FakeModel::replying("ok")).await;

        let (status, body) = call(
            &app,
            "POST",
            "/save_journal",
            Some(json!({"text": "Went for a walk by the lake."})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        let id = body["id"].as_str().unwrap().to_owned();
        assert!(id.starts_with("journal_") && id.ends_with(".txt"));

        let (_, body) = call(&app, "GET", "/load_journals", None).await;
        assert_eq!(
            body,
            json!({"journals": [{"id": id, "preview": "Went for a walk by the lake."}]})
        );

        let (status, body) = call(&app, "GET", &format!("/get_journal/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"content": "Went for a walk by the lake."}));

        let (status, body) = call(&app, "DELETE", &format!("/delete_journal/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "success"}));

        let (status, body) = call(&app, "GET", &format!("/get_journal/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");
    }

    #[tokio::test]
    async fn missing_or_empty_text_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let (app, _) = app(tmp.path(), FakeModel::replying("ok")).await;

        for body in [json!({}), json!({"text": ""})] {
            let (status, resp) = call(&app, "POST", "/save_journal", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(resp["error"], "No text");
        }
    }

    #[tokio::test]
    async fn deleting_unknown_entry_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let (app, _) = app(tmp.path(), FakeModel::replying("ok")).await;

        let (status, body) =
            call(&app, "DELETE", "/delete_journal/journal_1999-01-01_00-00-00.txt", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");
    }

    #[tokio::test]
    async fn traversal_is_rejected_on_get_and_delete() {
        let tmp = tempfile::tempdir().unwrap();
        let (app, _) = app(tmp.path(), FakeModel::replying("ok")).await;
        std::fs::write(tmp.path().join("secret.txt"), "do not touch").unwrap();

        for uri in [
            "/get_journal/..%2Fsecret.txt",
            "/get_journal/a..b",
            "/get_journal/.",
            "/get_journal/%2E",
        ] {
            let (status, body) = call(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"], "Invalid filename");
        }

        for uri in ["/delete_journal/..%2Fsecret.txt", "/delete_journal/%2E"] {
            let (status, body) = call(&app, "DELETE", uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"], "Invalid filename");
        }
        assert!(tmp.path().join("secret.txt").exists());
    }
}
