//! Model scorer metadata

use axum::{extract::State, Json};

use netra_core::ModelInfo;

use crate::{AppError, AppResult, AppState};

/// Method, feature order and class order of the attached model
pub async fn info(State(state): State<AppState>) -> AppResult<Json<ModelInfo>> {
    state
        .engine
        .lock()
        .model_info()
        .map(Json)
        .ok_or_else(|| AppError::ServiceUnavailable("no model attached (set NETRA_MODEL)".into()))
}
