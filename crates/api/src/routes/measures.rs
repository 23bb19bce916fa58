//! Measure Routes

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use storage::{Measure, NewMeasure};

use crate::{ApiError, AppState};

/// Query parameters for the listing endpoint
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// When set, return only this many of the newest readings
    pub limit: Option<i64>,
}

/// Response for the bulk delete endpoint
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: u64,
}

/// List stored readings, oldest first; `?limit=n` returns the n newest.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<Measure>>, ApiError> {
    let data = match params.limit {
        Some(limit) => state.store.select_limited(limit.clamp(0, 1000)).await?,
        None => state.store.select_all().await?,
    };
    Ok(Json(data))
}

/// Insert one reading; responds with the stored row wrapped in an array.
pub async fn insert(
    State(state): State<AppState>,
    Json(body): Json<NewMeasure>,
) -> Result<Json<Vec<Measure>>, ApiError> {
    let stored = state.store.insert(body).await?;
    Ok(Json(vec![stored]))
}

/// Remove every stored reading.
pub async fn delete_all(State(state): State<AppState>) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = state.store.delete_all().await?;
    Ok(Json(DeleteResponse { deleted }))
}
