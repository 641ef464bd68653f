//! Engine Errors
//!
//! One error type for the whole engine. Every variant is raised synchronously
//! at the offending call; nothing is retried internally.

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Key set of a candidate sensor mapping differs from the fixed channel set
    #[error("invalid sensor keys: missing [{}], unexpected [{}]", .missing.join(", "), .unexpected.join(", "))]
    SensorKeys {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// Sensor value is not a (finite) number
    #[error("sensor {channel} must be numeric, got {found}")]
    SensorType { channel: String, found: String },

    /// Sensor value outside [0, 100]
    #[error("sensor {channel} out of range [0-100]: {value}")]
    SensorRange { channel: String, value: f64 },

    #[error("unknown location: {0}")]
    LocationNotFound(String),

    #[error("no threat history to export")]
    EmptyHistory,

    #[error("fusion weights must sum to 1.0, got {sum}")]
    InvalidWeights { sum: f64 },

    #[error("location {key} has invalid coordinates ({lat}, {lon})")]
    InvalidCoordinates { key: String, lat: f64, lon: f64 },

    #[error("duplicate location key: {0}")]
    DuplicateLocation(String),

    #[error("fixed sensor source needs at least one vector")]
    EmptySource,

    #[error("export failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    /// Stable tag for callers that map errors onto transport status codes
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::SensorKeys { .. } => "validation_error",
            EngineError::SensorType { .. } => "type_error",
            EngineError::SensorRange { .. } => "range_error",
            EngineError::LocationNotFound(_) => "not_found",
            EngineError::EmptyHistory => "empty_state",
            EngineError::InvalidWeights { .. }
            | EngineError::InvalidCoordinates { .. }
            | EngineError::DuplicateLocation(_)
            | EngineError::EmptySource => "configuration_error",
            EngineError::Io(_) | EngineError::Serialization(_) => "export_error",
        }
    }

    /// True for errors caused by caller-supplied sensor input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EngineError::SensorKeys { .. }
                | EngineError::SensorType { .. }
                | EngineError::SensorRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_error_names_channel_and_value() {
        let err = EngineError::SensorRange {
            channel: "fume".to_string(),
            value: 150.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("fume"));
        assert!(msg.contains("150"));
        assert_eq!(err.kind(), "range_error");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_key_error_lists_both_sides() {
        let err = EngineError::SensorKeys {
            missing: vec!["thermal".to_string()],
            unexpected: vec!["sonar".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("thermal"));
        assert!(msg.contains("sonar"));
    }

    #[test]
    fn test_empty_history_kind() {
        assert_eq!(EngineError::EmptyHistory.kind(), "empty_state");
        assert!(!EngineError::EmptyHistory.is_input_error());
    }
}
