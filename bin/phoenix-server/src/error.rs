//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors become a `{"error": "..."}`
//! JSON body with an appropriate status code.
//!
//! Storage failures on the list/read paths report the raw error message to
//! the caller. This exposes file paths; anything not originating in the
//! store is logged in full and answered with a generic message.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use phoenix_core::StoreError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// All errors that can occur in the phoenix-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The caller sent an invalid or incomplete request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The caller referenced a session or journal that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Reading or writing the flat-file store failed.
    #[error("storage error: {0}")]
    Storage(StoreError),

    /// An unclassified internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ServerError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            ServerError::Storage(e) => {
                error!(error = %e, "storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ServerError::Internal(m) => {
                error!(message = %m, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

impl From<StoreError> for ServerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => ServerError::NotFound("Not found".into()),
            StoreError::InvalidId(_) => ServerError::BadRequest("Invalid filename".into()),
            StoreError::InvalidData(m) => ServerError::BadRequest(m),
            other => ServerError::Storage(other),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn store_errors_map_to_statuses() {
        let cases = [
            (StoreError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (StoreError::InvalidId("..".into()), StatusCode::BAD_REQUEST),
            (StoreError::InvalidData("No text".into()), StatusCode::BAD_REQUEST),
            (
                StoreError::Io(std::io::Error::other("disk on fire")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ServerError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn invalid_id_reads_invalid_filename() {
        match ServerError::from(StoreError::InvalidId("../x".into())) {
            ServerError::BadRequest(m) => assert_eq!(m, "Invalid filename"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
