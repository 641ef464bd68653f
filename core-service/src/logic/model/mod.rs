//! Model Module - Pluggable Scorers
//!
//! Tách model scoring khỏi rule-based fusion.
//! Dễ dàng swap model: anything implementing `ThreatModel` can be attached.

pub mod features;
pub mod inference;

// Re-export common types
pub use features::{ModelFeatures, FEATURE_COUNT, FEATURE_NAMES};
pub use inference::{
    model_by_name,
    ClassProbabilities,
    FeatureContribution,
    HeuristicModel,
    ModelInfo,
    ModelPrediction,
    ThreatModel,
};
