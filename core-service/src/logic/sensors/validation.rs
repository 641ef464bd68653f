//! Sensor Validation
//!
//! Pure guards. Key set first; then each channel in canonical order is
//! checked for type, then range. The first failing channel is reported.

use serde_json::{Map, Value};

use super::types::{SensorChannel, SensorReadings, READING_MAX, READING_MIN};
use crate::error::{EngineError, EngineResult};

/// Check finiteness and bounds of typed readings
pub fn validate_readings(readings: &SensorReadings) -> EngineResult<()> {
    for channel in SensorChannel::ALL {
        check_value(channel, readings.get(channel))?;
    }
    Ok(())
}

/// Validate an untyped candidate (must be a JSON object)
pub fn validate_value(value: &Value) -> EngineResult<SensorReadings> {
    match value.as_object() {
        Some(map) => validate_map(map),
        None => Err(EngineError::SensorType {
            channel: "sensors".to_string(),
            found: json_type_name(value).to_string(),
        }),
    }
}

/// Validate an untyped channel -> value mapping
pub fn validate_map(map: &Map<String, Value>) -> EngineResult<SensorReadings> {
    check_key_set(map.keys().map(String::as_str))?;

    let mut readings = SensorReadings::default();
    for channel in SensorChannel::ALL {
        // key set already checked
        let raw = &map[channel.as_str()];
        let value = raw.as_f64().ok_or_else(|| EngineError::SensorType {
            channel: channel.to_string(),
            found: json_type_name(raw).to_string(),
        })?;
        check_value(channel, value)?;
        readings.set(channel, value);
    }

    Ok(readings)
}

/// Key set must equal the fixed channel set exactly
pub fn check_key_set<'a>(keys: impl IntoIterator<Item = &'a str>) -> EngineResult<()> {
    let mut present = Vec::new();
    let mut unexpected = Vec::new();

    for key in keys {
        match SensorChannel::from_name(key) {
            Some(channel) => present.push(channel),
            None => unexpected.push(key.to_string()),
        }
    }

    let missing: Vec<String> = SensorChannel::ALL
        .iter()
        .filter(|c| !present.contains(c))
        .map(|c| c.to_string())
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        return Ok(());
    }

    unexpected.sort();
    Err(EngineError::SensorKeys { missing, unexpected })
}

fn check_value(channel: SensorChannel, value: f64) -> EngineResult<()> {
    if !value.is_finite() {
        return Err(EngineError::SensorType {
            channel: channel.to_string(),
            found: format!("non-finite number ({})", value),
        });
    }
    if !(READING_MIN..=READING_MAX).contains(&value) {
        return Err(EngineError::SensorRange {
            channel: channel.to_string(),
            value,
        });
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// TESTS
// ============================================================================
