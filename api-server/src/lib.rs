//! N.E.T.R.A. API Server
//!
//! HTTP boundary over the threat fusion engine. One engine per process,
//! shared across handlers behind a mutex.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 NETRA API                   │
//! ├─────────────────────────────────────────────┤
//! │  ┌───────────┐        ┌──────────────────┐  │
//! │  │  Router   │  ───►  │  ThreatEngine    │  │
//! │  │  (Axum)   │        │  (Mutex, shared) │  │
//! │  └───────────┘        └────────┬─────────┘  │
//! │                                ▼            │
//! │                      ┌──────────────────┐   │
//! │                      │  History Ledger  │   │
//! │                      │   (in memory)    │   │
//! │                      └──────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use tokio::sync::broadcast;

use netra_core::{SharedEngine, ThreatAssessment, ThreatEngine};

pub use config::Config;
pub use error::{AppError, AppResult};

/// Assessments buffered per slow stream subscriber
const EVENT_BUFFER: usize = 256;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: SharedEngine,
    pub config: Config,
    /// Every fresh assessment, for `/api/v1/stream`
    pub events: broadcast::Sender<ThreatAssessment>,
}

impl AppState {
    /// Fresh engine built from the configuration
    pub fn new(config: Config) -> Self {
        let engine = ThreatEngine::new(config.engine.clone());
        Self::with_engine(engine, config)
    }

    /// Wrap an existing engine (tests, custom sources)
    pub fn with_engine(engine: ThreatEngine, config: Config) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            engine: engine.into_shared(),
            config,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ThreatAssessment> {
        self.events.subscribe()
    }

    /// Push to stream subscribers; no subscribers is not an error
    pub fn publish(&self, assessment: &ThreatAssessment) {
        let _ = self.events.send(assessment.clone());
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Registry
        .route("/api/v1/locations", get(handlers::locations::list))

        // Evaluation
        .route("/api/v1/analyze", post(handlers::analysis::analyze))
        .route("/api/v1/batch", post(handlers::analysis::batch))

        // Model scorer
        .route("/api/v1/model/info", get(handlers::model::info))

        // History
        .route("/api/v1/history", get(handlers::history::list))
        .route("/api/v1/history/recent", get(handlers::history::recent))
        .route("/api/v1/statistics", get(handlers::history::statistics))
        .route("/api/v1/export", get(handlers::history::export))

        // Simulation + maintenance
        .route("/api/v1/sensors/live", get(handlers::sensors::live))
        .route("/api/v1/stream", get(handlers::stream::events))
        .route("/api/v1/reset", post(handlers::system::reset));

    Router::new()
        .route("/health", get(handlers::health::check))
        .merge(api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
