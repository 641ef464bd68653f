//! Simulated live sensor feed

use axum::{extract::State, Json};
use serde::Serialize;

use netra_core::SensorVector;

use crate::AppState;

#[derive(Serialize)]
pub struct LiveReading {
    timestamp: String,
    sensors: SensorVector,
    status: &'static str,
}

/// One synthetic reading; not recorded in history
pub async fn live(State(state): State<AppState>) -> Json<LiveReading> {
    let sensors = state.engine.lock().sample_live();
    Json(LiveReading {
        timestamp: chrono::Utc::now().to_rfc3339(),
        sensors,
        status: "simulated",
    })
}
