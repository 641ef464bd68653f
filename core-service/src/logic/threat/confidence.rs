//! Confidence Estimator
//!
//! Sensor agreement score: tightly clustered readings = high confidence,
//! independent of the fused probability.

use crate::logic::round2;
use crate::logic::sensors::SensorVector;

/// Variance divisor mapping variance onto the 0-100 scale
pub const VARIANCE_SCALE: f64 = 10.0;

/// clamp(100 - variance / 10, 0, 100), 2dp
pub fn confidence(sensors: &SensorVector) -> f64 {
    let variance = population_variance(&sensors.values());
    round2((100.0 - variance / VARIANCE_SCALE).clamp(0.0, 100.0))
}

/// Population variance (divides by N, not N - 1)
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::sensors::SensorReadings;

    fn vector(values: [f64; 7]) -> SensorVector {
        SensorVector::new(SensorReadings::from_array(values)).unwrap()
    }

    #[test]
    fn test_zero_variance_is_full_confidence() {
        assert_eq!(confidence(&vector([10.0; 7])), 100.0);
        assert_eq!(confidence(&vector([93.0; 7])), 100.0);
    }

    #[test]
    fn test_reference_scenario() {
        // 80..50 step 5: variance = 100
        assert_eq!(confidence(&vector([80.0, 75.0, 70.0, 65.0, 60.0, 55.0, 50.0])), 90.0);
    }

    #[test]
    fn test_scattered_readings_clamp_to_zero() {
        let v = vector([0.0, 100.0, 0.0, 100.0, 0.0, 100.0, 0.0]);
        assert_eq!(confidence(&v), 0.0);
    }

    #[test]
    fn test_population_variance() {
        assert_eq!(population_variance(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 4.0);
        assert_eq!(population_variance(&[]), 0.0);
    }
}
