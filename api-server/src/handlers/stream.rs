//! Server-sent event stream of assessments

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{Stream, StreamExt};
use tokio_stream::wrappers::BroadcastStream;

use crate::AppState;

/// One `assessment` event per evaluation, from analyze and batch
pub async fn events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::info!("Stream client connected");

    let stream = BroadcastStream::new(state.subscribe()).filter_map(|msg| async move {
        match msg {
            Ok(assessment) => match serde_json::to_string(&assessment) {
                Ok(json) => Some(Ok(Event::default().event("assessment").data(json))),
                Err(e) => {
                    tracing::error!("Failed to serialize assessment: {}", e);
                    None
                }
            },
            // Lagged receivers skip what they missed
            Err(e) => {
                tracing::warn!("Stream client lagging: {}", e);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
