//! Threat Module
//!
//! Fuse seven sensor channels into a threat probability, then classify it.
//! Đây là CORE STEP - nơi quyết định CRITICAL/HIGH/MODERATE/LOW.
//!
//! ## Structure
//! - `types`: Core types (ThreatLevel, FusionScore, Classification)
//! - `rules`: Weights, bonus constants, thresholds
//! - `fusion`: Weighted sum + correlation bonuses
//! - `classifier`: Probability -> level, recommendations
//! - `confidence`: Sensor agreement score
//!
//! ## Usage
//! ```ignore
//! use crate::logic::threat::{fuse, classify, confidence};
//!
//! let score = fuse(&sensors);
//! match classify(score.probability).level {
//!     ThreatLevel::Critical => println!("Evacuate"),
//!     ThreatLevel::High => println!("Investigate"),
//!     _ => println!("Monitor"),
//! }
//! ```

pub mod types;
pub mod rules;
pub mod fusion;
pub mod classifier;
pub mod confidence;

// Re-export main types for convenience
pub use types::{
    AppliedBonus,
    Classification,
    CorrelationKind,
    FusionScore,
    ThreatLevel,
};

pub use rules::{
    ClassificationThresholds,
    FusionWeights,
    CRITICAL_THRESHOLD,
    HIGH_THRESHOLD,
    MODERATE_THRESHOLD,
};

pub use fusion::{fuse, fuse_with_weights, correlation_bonuses};
pub use classifier::{classify, classify_with_thresholds, recommendations};
pub use confidence::confidence;
