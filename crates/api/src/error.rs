//! Request Error Mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use snapshot::SnapshotError;
use storage::StorageError;
use thiserror::Error;
use tracing::warn;

/// Failures surfaced to HTTP callers.
///
/// Startup-time store errors never reach this type; they are retried
/// behind the readiness gate. Whatever fails during a request maps to a
/// single error payload here.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(error = %self, "request failed");
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
