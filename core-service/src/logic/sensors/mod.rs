//! Sensor Module
//!
//! Seven-channel sensor snapshot and its validation guards.
//!
//! ## Structure
//! - `types`: SensorChannel, SensorReadings (raw), SensorVector (validated)
//! - `validation`: key set / type / range checks

pub mod types;
pub mod validation;

pub use types::{SensorChannel, SensorReadings, SensorVector, CHANNEL_COUNT};
pub use validation::{check_key_set, validate_map, validate_readings, validate_value};
