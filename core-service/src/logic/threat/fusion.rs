//! Fusion Scorer
//!
//! Weighted sum + correlation bonuses -> bounded probability.
//! Pure and deterministic: no randomness, no state.

use super::rules::{
    FusionWeights, CV_AGREEMENT_BONUS, CV_AGREEMENT_MAX_GAP, DISTURBANCE_GPR_BONUS,
    DISTURBANCE_GPR_MIN, FUME_METAL_BONUS, FUME_METAL_MIN, HIGH_READING_COUNT, HIGH_READING_MIN,
    MULTI_SENSOR_BONUS, PROBABILITY_MAX, THERMAL_FUME_BONUS, THERMAL_FUME_MIN,
};
use super::types::{AppliedBonus, CorrelationKind, FusionScore};
use crate::logic::round2;
use crate::logic::sensors::SensorVector;

/// Fuse with the default weight table
pub fn fuse(sensors: &SensorVector) -> FusionScore {
    fuse_with_weights(sensors, &FusionWeights::default())
}

/// Fuse with a caller-supplied (already validated) weight table
pub fn fuse_with_weights(sensors: &SensorVector, weights: &FusionWeights) -> FusionScore {
    let base: f64 = sensors.iter().map(|(c, v)| v * weights.get(c)).sum();

    let bonuses = correlation_bonuses(sensors);
    let bonus_total: f64 = bonuses.iter().map(|b| b.points).sum();

    // Readings are non-negative, so only the upper bound needs clamping
    let probability = round2((base + bonus_total).min(PROBABILITY_MAX));

    FusionScore {
        base_score: round2(base),
        bonuses,
        bonus_total,
        probability,
    }
}

/// Every correlation check runs against the raw readings
pub fn correlation_bonuses(sensors: &SensorVector) -> Vec<AppliedBonus> {
    let r = sensors.readings();
    let mut bonuses = Vec::new();

    if r.fume > FUME_METAL_MIN && r.metal > FUME_METAL_MIN {
        bonuses.push(AppliedBonus {
            kind: CorrelationKind::FumeMetal,
            points: FUME_METAL_BONUS,
            reason: format!("Chemical + metal signature (fume {:.1}, metal {:.1})", r.fume, r.metal),
        });
    }

    let cv_gap = (r.drone_cv - r.ground_cv).abs();
    if cv_gap < CV_AGREEMENT_MAX_GAP {
        bonuses.push(AppliedBonus {
            kind: CorrelationKind::CvAgreement,
            points: CV_AGREEMENT_BONUS,
            reason: format!("Ground and aerial vision agree (gap {:.1})", cv_gap),
        });
    }

    if r.thermal > THERMAL_FUME_MIN && r.fume > THERMAL_FUME_MIN {
        bonuses.push(AppliedBonus {
            kind: CorrelationKind::ThermalFume,
            points: THERMAL_FUME_BONUS,
            reason: format!("Explosive heat signature (thermal {:.1}, fume {:.1})", r.thermal, r.fume),
        });
    }

    if r.disturbance > DISTURBANCE_GPR_MIN && r.gpr > DISTURBANCE_GPR_MIN {
        bonuses.push(AppliedBonus {
            kind: CorrelationKind::DisturbanceGpr,
            points: DISTURBANCE_GPR_BONUS,
            reason: format!("Buried device pattern (disturbance {:.1}, gpr {:.1})", r.disturbance, r.gpr),
        });
    }

    let high_count = sensors.iter().filter(|(_, v)| *v > HIGH_READING_MIN).count();
    if high_count >= HIGH_READING_COUNT {
        bonuses.push(AppliedBonus {
            kind: CorrelationKind::MultiSensorHigh,
            points: MULTI_SENSOR_BONUS,
            reason: format!("{} sensors above {:.0}", high_count, HIGH_READING_MIN),
        });
    }

    bonuses
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::sensors::SensorReadings;

    fn vector(values: [f64; 7]) -> SensorVector {
        SensorVector::new(SensorReadings::from_array(values)).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        // fume, metal, gpr, ground_cv, drone_cv, disturbance, thermal
        let score = fuse(&vector([80.0, 75.0, 70.0, 65.0, 60.0, 55.0, 50.0]));

        assert_eq!(score.base_score, 67.3);
        assert!(score.has_bonus(CorrelationKind::FumeMetal));
        assert!(score.has_bonus(CorrelationKind::CvAgreement));
        assert!(!score.has_bonus(CorrelationKind::ThermalFume));
        assert!(!score.has_bonus(CorrelationKind::DisturbanceGpr));
        assert!(!score.has_bonus(CorrelationKind::MultiSensorHigh));
        assert_eq!(score.bonus_total, 20.0);
        assert_eq!(score.probability, 87.3);
    }

    #[test]
    fn test_uniform_low_readings() {
        let score = fuse(&vector([10.0; 7]));
        // cv gap 0 always fires
        assert_eq!(score.base_score, 10.0);
        assert_eq!(score.bonuses.len(), 1);
        assert_eq!(score.probability, 18.0);
    }

    #[test]
    fn test_all_bonuses_and_upper_clamp() {
        let score = fuse(&vector([100.0; 7]));
        assert_eq!(score.bonuses.len(), 5);
        assert_eq!(score.bonus_total, 38.0);
        assert_eq!(score.probability, 100.0);
    }

    #[test]
    fn test_zero_readings() {
        let score = fuse(&vector([0.0; 7]));
        assert_eq!(score.base_score, 0.0);
        assert_eq!(score.probability, 8.0);
    }

    #[test]
    fn test_thresholds_are_strict() {
        // exactly 70 / 60 / 65 / 75 do not trigger; cv gap exactly 15 does not trigger
        let score = fuse(&vector([70.0, 70.0, 65.0, 0.0, 15.0, 65.0, 60.0]));
        assert!(score.bonuses.is_empty());
    }

    #[test]
    fn test_multi_sensor_counts_all_channels() {
        // four channels above 75, cv gap kept wide
        let score = fuse(&vector([10.0, 10.0, 80.0, 0.0, 76.0, 90.0, 99.0]));
        assert!(score.has_bonus(CorrelationKind::MultiSensorHigh));
    }

    #[test]
    fn test_deterministic() {
        let v = vector([33.3, 41.7, 12.9, 88.1, 79.4, 5.5, 61.0]);
        let first = fuse(&v);
        for _ in 0..10 {
            assert_eq!(fuse(&v), first);
        }
    }

    #[test]
    fn test_bounded_over_grid() {
        let steps = [0.0, 24.99, 50.0, 70.01, 75.5, 100.0];
        for &a in &steps {
            for &b in &steps {
                let p = fuse(&vector([a, b, a, b, a, b, a])).probability;
                assert!((0.0..=100.0).contains(&p), "probability {} out of bounds", p);
            }
        }
    }

    #[test]
    fn test_custom_weights() {
        let weights = FusionWeights {
            fume: 1.0,
            metal: 0.0,
            gpr: 0.0,
            ground_cv: 0.0,
            drone_cv: 0.0,
            disturbance: 0.0,
            thermal: 0.0,
        };
        let score = fuse_with_weights(&vector([40.0, 0.0, 0.0, 0.0, 90.0, 0.0, 0.0]), &weights);
        assert_eq!(score.base_score, 40.0);
        assert_eq!(score.probability, 40.0);
    }
}
