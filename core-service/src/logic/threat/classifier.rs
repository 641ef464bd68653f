//! Threat Classifier
//!
//! CHỈ chứa logic classify + recommendations.
//! Input: fused probability
//! Output: Classification, recommended actions

use super::rules::ClassificationThresholds;
use super::types::{Classification, ThreatLevel};

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Classify with the engine thresholds (75/50/25)
pub fn classify(probability: f64) -> Classification {
    classify_with_thresholds(probability, &ClassificationThresholds::default())
}

/// Evaluated high-to-low, first match wins. Boundaries belong to the higher band.
pub fn classify_with_thresholds(
    probability: f64,
    thresholds: &ClassificationThresholds,
) -> Classification {
    level_for(probability, thresholds).into()
}

pub fn level_for(probability: f64, thresholds: &ClassificationThresholds) -> ThreatLevel {
    if probability >= thresholds.critical_min {
        ThreatLevel::Critical
    } else if probability >= thresholds.high_min {
        ThreatLevel::High
    } else if probability >= thresholds.moderate_min {
        ThreatLevel::Moderate
    } else {
        ThreatLevel::Low
    }
}

// ============================================================================
// RECOMMENDATIONS (advisory only)
// ============================================================================

const CRITICAL_ACTIONS: &[&str] = &[
    "EVACUATE 200m radius IMMEDIATELY",
    "BLOCK all vehicle and pedestrian traffic",
    "DEPLOY bomb disposal unit",
    "ALERT military and civilian authorities",
    "MAINTAIN continuous aerial surveillance",
    "CAPTURE high-resolution evidence",
    "SECURE perimeter with armed forces",
];

const HIGH_ACTIONS: &[&str] = &[
    "CONDUCT detailed ground investigation",
    "PLACE warning markers and caution tape",
    "INCREASE drone surveillance frequency",
    "DOCUMENT area with multiple angles",
    "REASSESS threat level every 15 minutes",
    "NOTIFY local security personnel",
    "PREPARE evacuation routes",
];

const MODERATE_ACTIONS: &[&str] = &[
    "MONITOR area with routine patrols",
    "LOG sensor data for pattern analysis",
    "SCHEDULE follow-up scans in 2 hours",
    "UPDATE threat database",
    "MAINTAIN low-risk status",
];

const LOW_ACTIONS: &[&str] = &[
    "AREA CLEARED - No immediate threat",
    "UPDATE digital twin database",
    "SAFE for normal traffic operations",
    "ARCHIVE scan data for future reference",
];

/// Fixed, ordered action list per level
pub fn recommendations(level: ThreatLevel) -> &'static [&'static str] {
    match level {
        ThreatLevel::Critical => CRITICAL_ACTIONS,
        ThreatLevel::High => HIGH_ACTIONS,
        ThreatLevel::Moderate => MODERATE_ACTIONS,
        ThreatLevel::Low => LOW_ACTIONS,
    }
}

// ============================================================================
// TESTS
// ============================================================================
