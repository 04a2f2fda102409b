//! Request / response DTO types.
//!
//! Request fields are `Option` so a missing field reaches the handler and is
//! answered with the endpoint's own 400 message instead of a generic
//! deserialization error.

pub mod chat;
pub mod history;
pub mod journal;
pub mod mood;

use axum::extract::FromRequest;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ServerError;

/// `axum::Json` whose rejections are reported as `{"error": ...}` with 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);

/// `{"status": "success"}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self { status: "success".into() }
    }
}
