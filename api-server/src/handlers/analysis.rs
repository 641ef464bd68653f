//! Evaluation handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use netra_core::ThreatAssessment;

use crate::{AppResult, AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[validate(length(min = 1, max = 64))]
    pub location: String,
    /// Checked by the engine: key set, then type and range per channel
    pub sensors: serde_json::Value,
}

#[derive(Debug, Deserialize, Default, Validate)]
pub struct BatchRequest {
    /// Subset of location keys; all locations when absent
    #[validate(length(min = 1))]
    pub locations: Option<Vec<String>>,
}

/// Evaluate one sensor reading at a known location
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> AppResult<Json<ThreatAssessment>> {
    let Json(req) = payload?;
    req.validate()?;

    let assessment = state.engine.lock().evaluate_json(&req.location, &req.sensors)?;
    tracing::info!(
        scan_id = %assessment.scan_id,
        level = %assessment.threat_level,
        "Analyzed {} ({:.2}%)",
        assessment.location.key,
        assessment.probability
    );
    state.publish(&assessment);

    Ok(Json(assessment))
}

/// Evaluate locations with synthetic readings
pub async fn batch(
    State(state): State<AppState>,
    payload: Option<Json<BatchRequest>>,
) -> AppResult<Json<Vec<ThreatAssessment>>> {
    let req = payload.map(|Json(req)| req).unwrap_or_default();
    req.validate()?;

    let results = state.engine.lock().batch_evaluate(req.locations.as_deref())?;
    tracing::info!("Batch evaluated {} locations", results.len());
    for assessment in &results {
        state.publish(assessment);
    }

    Ok(Json(results))
}
