//! Sensor Types
//!
//! Fixed-shape sensor data. No scoring logic here.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of fused sensor channels
pub const CHANNEL_COUNT: usize = 7;

/// Lower bound of a normalized reading
pub const READING_MIN: f64 = 0.0;

/// Upper bound of a normalized reading
pub const READING_MAX: f64 = 100.0;

// ============================================================================
// SENSOR CHANNEL
// ============================================================================

/// One of the seven detector channels (rover + drone platforms)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorChannel {
    /// Chemical vapor detection
    Fume,
    /// Metallic object detection
    Metal,
    /// Ground penetrating radar
    Gpr,
    /// Ground-level computer vision
    GroundCv,
    /// Aerial computer vision
    DroneCv,
    /// Soil disturbance analysis
    Disturbance,
    /// Thermal signature detection
    Thermal,
}

impl SensorChannel {
    /// All channels in canonical order
    pub const ALL: [SensorChannel; CHANNEL_COUNT] = [
        SensorChannel::Fume,
        SensorChannel::Metal,
        SensorChannel::Gpr,
        SensorChannel::GroundCv,
        SensorChannel::DroneCv,
        SensorChannel::Disturbance,
        SensorChannel::Thermal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorChannel::Fume => "fume",
            SensorChannel::Metal => "metal",
            SensorChannel::Gpr => "gpr",
            SensorChannel::GroundCv => "ground_cv",
            SensorChannel::DroneCv => "drone_cv",
            SensorChannel::Disturbance => "disturbance",
            SensorChannel::Thermal => "thermal",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == name)
    }
}

impl std::fmt::Display for SensorChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RAW READINGS (unvalidated)
// ============================================================================

/// Raw channel readings as received from a caller
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorReadings {
    pub fume: f64,
    pub metal: f64,
    pub gpr: f64,
    pub ground_cv: f64,
    pub drone_cv: f64,
    pub disturbance: f64,
    pub thermal: f64,
}

impl SensorReadings {
    /// Every channel set to the same value
    pub fn uniform(value: f64) -> Self {
        Self {
            fume: value,
            metal: value,
            gpr: value,
            ground_cv: value,
            drone_cv: value,
            disturbance: value,
            thermal: value,
        }
    }

    /// Build from values in canonical channel order
    pub fn from_array(values: [f64; CHANNEL_COUNT]) -> Self {
        let [fume, metal, gpr, ground_cv, drone_cv, disturbance, thermal] = values;
        Self {
            fume,
            metal,
            gpr,
            ground_cv,
            drone_cv,
            disturbance,
            thermal,
        }
    }

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

    pub fn set(&mut self, channel: SensorChannel, value: f64) {
        match channel {
            SensorChannel::Fume => self.fume = value,
            SensorChannel::Metal => self.metal = value,
            SensorChannel::Gpr => self.gpr = value,
            SensorChannel::GroundCv => self.ground_cv = value,
            SensorChannel::DroneCv => self.drone_cv = value,
            SensorChannel::Disturbance => self.disturbance = value,
            SensorChannel::Thermal => self.thermal = value,
        }
    }
}

// ============================================================================
// SENSOR VECTOR (validated, immutable)
// ============================================================================

/// Validated snapshot of all seven channels.
///
/// Can only be obtained through validation, so every value is finite and
/// lies in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "SensorReadings")]
pub struct SensorVector {
    readings: SensorReadings,
}

impl SensorVector {
    /// Validate typed readings
    pub fn new(readings: SensorReadings) -> EngineResult<Self> {
        super::validation::validate_readings(&readings)?;
        Ok(Self { readings })
    }

    /// For generators whose output is in range by construction
    pub(crate) fn from_trusted(readings: SensorReadings) -> Self {
        debug_assert!(super::validation::validate_readings(&readings).is_ok());
        Self { readings }
    }

    /// Validate an untyped candidate mapping: key set first, then each channel
    /// in canonical order (type, then range)
    pub fn from_json(value: &serde_json::Value) -> EngineResult<Self> {
        let readings = super::validation::validate_value(value)?;
        Ok(Self { readings })
    }

    pub fn get(&self, channel: SensorChannel) -> f64 {
        self.readings.get(channel)
    }

    pub fn readings(&self) -> &SensorReadings {
        &self.readings
    }

    /// Values in canonical channel order
    pub fn values(&self) -> [f64; CHANNEL_COUNT] {
        SensorChannel::ALL.map(|c| self.readings.get(c))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SensorChannel, f64)> + '_ {
        SensorChannel::ALL.iter().map(move |&c| (c, self.readings.get(c)))
    }
}

impl TryFrom<SensorReadings> for SensorVector {
    type Error = EngineError;

    fn try_from(readings: SensorReadings) -> EngineResult<Self> {
        Self::new(readings)
    }
}

impl TryFrom<serde_json::Value> for SensorVector {
    type Error = EngineError;

    fn try_from(value: serde_json::Value) -> EngineResult<Self> {
        Self::from_json(&value)
    }
}

impl From<SensorVector> for SensorReadings {
    fn from(vector: SensorVector) -> Self {
        vector.readings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names_round_trip() {
        for channel in SensorChannel::ALL {
            assert_eq!(SensorChannel::from_name(channel.as_str()), Some(channel));
        }
        assert_eq!(SensorChannel::from_name("sonar"), None);
    }

    #[test]
    fn test_values_follow_canonical_order() {
        let readings = SensorReadings::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let vector = SensorVector::new(readings).unwrap();
        assert_eq!(vector.values(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(vector.get(SensorChannel::DroneCv), 5.0);
    }

    #[test]
    fn test_serializes_as_flat_mapping() {
        let vector = SensorVector::new(SensorReadings::uniform(10.0)).unwrap();
        let json = serde_json::to_value(vector).unwrap();
        assert_eq!(json["ground_cv"], 10.0);
        assert_eq!(json.as_object().unwrap().len(), CHANNEL_COUNT);
    }

    #[test]
    fn test_deserialize_validates() {
        let bad = serde_json::json!({
            "fume": 150, "metal": 10, "gpr": 10, "ground_cv": 10,
            "drone_cv": 10, "disturbance": 10, "thermal": 10
        });
        assert!(serde_json::from_value::<SensorVector>(bad).is_err());
    }
}
