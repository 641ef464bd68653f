//! History, statistics and export handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use netra_core::logic::history::to_csv_string;
use netra_core::{ExportFormat, Statistics, ThreatAssessment};

use crate::{AppError, AppResult, AppState};

#[derive(Debug, Deserialize, Default, Validate)]
pub struct HistoryQuery {
    /// 0 returns the full log
    #[validate(range(max = 10000))]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ExportQuery {
    pub format: Option<String>,
}

/// Full log, or the newest `limit` assessments; oldest first
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> AppResult<Json<Vec<ThreatAssessment>>> {
    let Query(query) = query?;
    query.validate()?;

    Ok(Json(state.engine.lock().history(query.limit)))
}

/// Newest assessments up to `NETRA_HISTORY_LIMIT`
pub async fn recent(State(state): State<AppState>) -> Json<Vec<ThreatAssessment>> {
    Json(state.engine.lock().recent())
}

pub async fn statistics(State(state): State<AppState>) -> Json<Statistics> {
    Json(state.engine.lock().statistics())
}

/// Flat rows as CSV, JSON array or JSON lines
pub async fn export(
    State(state): State<AppState>,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query?;
    let format: ExportFormat = query
        .format
        .as_deref()
        .unwrap_or("csv")
        .parse()
        .map_err(AppError::BadRequest)?;

    let rows = state.engine.lock().export_flat()?;
    tracing::info!("Exporting {} rows as {:?}", rows.len(), format);

    let response = match format {
        ExportFormat::Csv => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"netra_export.csv\""),
            ],
            to_csv_string(&rows),
        )
            .into_response(),
        ExportFormat::Json => Json(rows).into_response(),
        ExportFormat::Jsonl => {
            let mut body = String::new();
            for row in &rows {
                body.push_str(&serde_json::to_string(row).map_err(netra_core::EngineError::from)?);
                body.push('\n');
            }
            ([(header::CONTENT_TYPE, "application/x-ndjson")], body).into_response()
        }
    };
    Ok(response)
}
