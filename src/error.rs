//! Error Taxonomy
//!
//! Two families of errors exist in the service:
//!
//! - **`SearchError`**: raised on the query path. Only `NotReady` is ever visible to
//!   clients, and it is a "retry later" signal rather than a hard failure.
//! - **`IngestionError`**: raised while pulling pages from the upstream API during
//!   startup. These never escape the ingestion task; the loader logs them and keeps
//!   whatever it already collected.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Service is loading, please retry")]
    NotReady,

    #[error("Position {position} is out of range for a store of {len} messages")]
    OutOfRange { position: usize, len: usize },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = match &self {
            SearchError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            SearchError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SearchError::OutOfRange { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Upstream rate limited the request (status {0})")]
    RateLimited(u16),

    #[error("Upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Retry attempts exhausted after {0} tries")]
    Exhausted(usize),
}

impl IngestionError {
    /// Rate limiting and transport hiccups are worth another attempt; any other
    /// upstream status ends the ingestion run.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            IngestionError::RateLimited(_) | IngestionError::Transport(_)
        )
    }
}
