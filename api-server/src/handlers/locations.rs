//! Location registry handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use netra_core::LocationEntry;

use crate::{AppResult, AppState};

#[derive(Debug, Deserialize, Default)]
pub struct LocationFilter {
    pub state: Option<String>,
}

/// List monitored sites, optionally filtered by state
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<LocationFilter>, QueryRejection>,
) -> AppResult<Json<Vec<LocationEntry>>> {
    let Query(filter) = query?;
    let engine = state.engine.lock();
    let registry = engine.registry();

    let entries = match filter.state.as_deref() {
        Some(name) => registry.by_state(name).into_iter().cloned().collect(),
        None => registry.entries().to_vec(),
    };
    Ok(Json(entries))
}
