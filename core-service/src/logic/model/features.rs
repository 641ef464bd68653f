//! Model Features
//!
//! Fixed, named feature vector handed to pluggable scorers:
//! the seven channels plus six derived cross-sensor features.

use serde::{Deserialize, Serialize};

use crate::logic::sensors::SensorVector;

/// Số features trong mỗi vector
pub const FEATURE_COUNT: usize = 13;

/// Feature names in vector order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "fume",
    "metal",
    "gpr",
    "ground_cv",
    "drone_cv",
    "disturbance",
    "thermal",
    "fume_metal_product",
    "cv_average",
    "surface_anomaly",
    "high_fume_metal",
    "high_cv_detection",
    "multiple_indicators",
];

/// fume AND metal above this -> high_fume_metal
const FUME_METAL_FLAG_MIN: f64 = 70.0;

/// Either vision channel above this -> high_cv_detection
const CV_FLAG_MIN: f64 = 70.0;

/// Indicator channels above this count toward multiple_indicators
const INDICATOR_MIN: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelFeatures {
    pub fume: f64,
    pub metal: f64,
    pub gpr: f64,
    pub ground_cv: f64,
    pub drone_cv: f64,
    pub disturbance: f64,
    pub thermal: f64,
    /// fume * metal / 100
    pub fume_metal_product: f64,
    /// (ground_cv + drone_cv) / 2
    pub cv_average: f64,
    /// (disturbance + thermal) / 2
    pub surface_anomaly: f64,
    /// 1.0 or 0.0
    pub high_fume_metal: f64,
    /// 1.0 or 0.0
    pub high_cv_detection: f64,
    /// 0..=4: fume, metal, gpr, disturbance above 60
    pub multiple_indicators: f64,
}

impl ModelFeatures {
    pub fn extract(sensors: &SensorVector) -> Self {
        let r = sensors.readings();

        let indicators = [r.fume, r.metal, r.gpr, r.disturbance]
            .iter()
            .filter(|&&v| v > INDICATOR_MIN)
            .count();

        Self {
            fume: r.fume,
            metal: r.metal,
            gpr: r.gpr,
            ground_cv: r.ground_cv,
            drone_cv: r.drone_cv,
            disturbance: r.disturbance,
            thermal: r.thermal,
            fume_metal_product: r.fume * r.metal / 100.0,
            cv_average: (r.ground_cv + r.drone_cv) / 2.0,
            surface_anomaly: (r.disturbance + r.thermal) / 2.0,
            high_fume_metal: flag(r.fume > FUME_METAL_FLAG_MIN && r.metal > FUME_METAL_FLAG_MIN),
            high_cv_detection: flag(r.ground_cv > CV_FLAG_MIN || r.drone_cv > CV_FLAG_MIN),
            multiple_indicators: indicators as f64,
        }
    }

    /// Values in `FEATURE_NAMES` order
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.fume,
            self.metal,
            self.gpr,
            self.ground_cv,
            self.drone_cv,
            self.disturbance,
            self.thermal,
            self.fume_metal_product,
            self.cv_average,
            self.surface_anomaly,
            self.high_fume_metal,
            self.high_cv_detection,
            self.multiple_indicators,
        ]
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| self.as_array()[i])
    }
}

fn flag(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::sensors::SensorReadings;

    #[test]
    fn test_derived_features() {
        let sensors = SensorVector::new(SensorReadings::from_array([
            80.0, 75.0, 70.0, 65.0, 60.0, 55.0, 50.0,
        ]))
        .unwrap();
        let f = ModelFeatures::extract(&sensors);

        assert_eq!(f.fume_metal_product, 60.0);
        assert_eq!(f.cv_average, 62.5);
        assert_eq!(f.surface_anomaly, 52.5);
        assert_eq!(f.high_fume_metal, 1.0);
        assert_eq!(f.high_cv_detection, 0.0);
        // fume, metal, gpr > 60; disturbance 55 is not
        assert_eq!(f.multiple_indicators, 3.0);
    }

    #[test]
    fn test_named_access_matches_array() {
        let sensors = SensorVector::new(SensorReadings::uniform(40.0)).unwrap();
        let f = ModelFeatures::extract(&sensors);
        for (i, name) in FEATURE_NAMES.iter().enumerate() {
            assert_eq!(f.get(name), Some(f.as_array()[i]));
        }
        assert_eq!(f.get("danger_level"), None);
    }
}
