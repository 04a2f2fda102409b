use thiserror::Error;

/// Errors returned by the flat-file stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A filesystem I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored file could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No file exists for the requested id.
    #[error("not found: {0}")]
    NotFound(String),

    /// The id would resolve outside the store's directory.
    #[error("invalid id: {0}")]
    InvalidId(String),

    /// The payload failed validation (empty text, too-short history, ...).
    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Errors from the remote generation service.
///
/// Callers of [`crate::gateway::LlmGateway::respond`] never see these; they
/// are logged and replaced by the fallback message.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The HTTP request failed (connect, TLS, body decode, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("generation service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The reply carried no text candidate.
    #[error("generation service returned no text")]
    EmptyResponse,

    /// No API key was configured.
    #[error("no API key configured")]
    MissingApiKey,
}
