//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    evaluations: u64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let evaluations = state.engine.lock().evaluation_count();
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        evaluations,
    })
}
