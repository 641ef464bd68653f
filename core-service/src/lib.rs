//! N.E.T.R.A. Core - Multi-sensor threat fusion engine
//!
//! Seven normalized detector channels in, a fused threat probability,
//! classification and confidence out. Every evaluation lands in an
//! append-only history that can be summarized and exported.

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{EngineError, EngineResult};
pub use logic::config::EngineConfig;
pub use logic::engine::{SharedEngine, ThreatAssessment, ThreatEngine};
pub use logic::history::{ExportFormat, FlatRow, Statistics};
pub use logic::location::{LocationEntry, LocationRegistry};
pub use logic::model::{model_by_name, HeuristicModel, ModelInfo, ModelPrediction, ThreatModel};
pub use logic::sensors::{SensorChannel, SensorReadings, SensorVector};
pub use logic::source::{FixedSource, RandomSource, SamplingMode, SensorSource};
pub use logic::threat::{FusionScore, FusionWeights, ThreatLevel};
