//! Snapshot Route

use axum::{extract::State, Json};
use std::sync::Arc;
use storage::Measure;

use crate::{ApiError, AppState};

/// Latest reading per distinct sensor, as a flat array.
///
/// The response is produced once the fan-out has fully joined: callers
/// see the complete snapshot or one error, never a partial mix.
pub async fn get_snapshot(State(state): State<AppState>) -> Result<Json<Vec<Measure>>, ApiError> {
    let readings = snapshot::snapshot(Arc::clone(&state.store)).await?;
    Ok(Json(readings))
}
