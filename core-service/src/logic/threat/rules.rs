//! Fusion Rules & Thresholds
//!
//! Weight table, correlation bonus constants and level thresholds.
//! KHÔNG chứa logic fuse/classify - chỉ constants và config.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::logic::sensors::SensorChannel;

// ============================================================================
// LEVEL THRESHOLDS (closed-above: boundary belongs to the higher band)
// ============================================================================

/// At or above = CRITICAL
pub const CRITICAL_THRESHOLD: f64 = 75.0;

/// At or above = HIGH
pub const HIGH_THRESHOLD: f64 = 50.0;

/// At or above = MODERATE, below = LOW
pub const MODERATE_THRESHOLD: f64 = 25.0;

/// Fused probability ceiling
pub const PROBABILITY_MAX: f64 = 100.0;

// ============================================================================
// CORRELATION BONUSES (evaluated on raw readings, all additive)
// ============================================================================

/// fume > 70 AND metal > 70 (IED chemical + metal signature)
pub const FUME_METAL_MIN: f64 = 70.0;
pub const FUME_METAL_BONUS: f64 = 12.0;

/// |drone_cv - ground_cv| < 15 (ground and aerial views agree)
pub const CV_AGREEMENT_MAX_GAP: f64 = 15.0;
pub const CV_AGREEMENT_BONUS: f64 = 8.0;

/// thermal > 60 AND fume > 60 (explosive heat signature)
pub const THERMAL_FUME_MIN: f64 = 60.0;
pub const THERMAL_FUME_BONUS: f64 = 7.0;

/// disturbance > 65 AND gpr > 65 (buried device)
pub const DISTURBANCE_GPR_MIN: f64 = 65.0;
pub const DISTURBANCE_GPR_BONUS: f64 = 6.0;

/// At least 4 channels above 75
pub const HIGH_READING_MIN: f64 = 75.0;
pub const HIGH_READING_COUNT: usize = 4;
pub const MULTI_SENSOR_BONUS: f64 = 5.0;

/// Allowed drift of the weight sum from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

// ============================================================================
// FUSION WEIGHTS
// ============================================================================

/// Per-channel weight table. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionWeights {
    pub fume: f64,
    pub metal: f64,
    pub gpr: f64,
    pub ground_cv: f64,
    pub drone_cv: f64,
    pub disturbance: f64,
    pub thermal: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            fume: 0.20,
            metal: 0.18,
            gpr: 0.15,
            ground_cv: 0.12,
            drone_cv: 0.15,
            disturbance: 0.10,
            thermal: 0.10,
        }
    }
}

impl FusionWeights {
    pub fn get(&self, channel: SensorChannel) -> f64 {
        match channel {
            SensorChannel::Fume => self.fume,
            SensorChannel::Metal => self.metal,
            SensorChannel::Gpr => self.gpr,
            SensorChannel::GroundCv => self.ground_cv,
            SensorChannel::DroneCv => self.drone_cv,
            SensorChannel::Disturbance => self.disturbance,
            SensorChannel::Thermal => self.thermal,
        }
    }

    pub fn sum(&self) -> f64 {
        SensorChannel::ALL.iter().map(|&c| self.get(c)).sum()
    }

    /// Re-tuned tables are accepted only if they still sum to 1.0
    pub fn validate(&self) -> EngineResult<()> {
        let sum = self.sum();
        let non_negative = SensorChannel::ALL.iter().all(|&c| self.get(c) >= 0.0);
        if !non_negative || (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EngineError::InvalidWeights { sum });
        }
        Ok(())
    }
}

// ============================================================================
// CONFIGURABLE THRESHOLDS
// ============================================================================

/// Probability -> level thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    pub critical_min: f64,
    pub high_min: f64,
    pub moderate_min: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            critical_min: CRITICAL_THRESHOLD,
            high_min: HIGH_THRESHOLD,
            moderate_min: MODERATE_THRESHOLD,
        }
    }
}

impl ClassificationThresholds {
    /// Live-dashboard banding (75/55/35). Display only: the ledger and
    /// statistics always use the default bands.
    pub fn dashboard() -> Self {
        Self {
            critical_min: 75.0,
            high_min: 55.0,
            moderate_min: 35.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = FusionWeights::default();
        assert!((weights.sum() - 1.0).abs() < WEIGHT_SUM_TOLERANCE);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_retuned_weights_must_sum_to_one() {
        let weights = FusionWeights {
            fume: 0.10,
            ..Default::default()
        };
        match weights.validate() {
            Err(EngineError::InvalidWeights { sum }) => assert!((sum - 0.9).abs() < 1e-9),
            other => panic!("expected InvalidWeights, got {:?}", other),
        }

        let shifted = FusionWeights {
            fume: 0.25,
            metal: 0.13,
            ..Default::default()
        };
        assert!(shifted.validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = FusionWeights {
            fume: 0.40,
            metal: -0.02,
            ..Default::default()
        };
        assert!(weights.validate().is_err());
    }
}
