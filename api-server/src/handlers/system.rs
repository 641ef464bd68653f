//! Maintenance handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct ResetResponse {
    status: &'static str,
    message: &'static str,
}

/// Clear history and restart scan numbering
pub async fn reset(State(state): State<AppState>) -> Json<ResetResponse> {
    state.engine.lock().reset();
    tracing::warn!("History reset via API");
    Json(ResetResponse {
        status: "success",
        message: "System reset complete",
    })
}
