//! Logic Module - Business Logic & Engines
//!
//! Chứa toàn bộ xử lý: validation, fusion, classification, history.
//!
//! ## Structure
//! - `sensors/` - Channel types + input validation
//! - `threat/` - Weighted fusion, correlation bonuses, classification, confidence
//! - `model/` - Pluggable scorers (feature vector + heuristic fallback)
//! - `history/` - Append-only ledger, statistics, flat export
//! - `location` - Monitored site registry
//! - `source` - Synthetic sensor sources (random / fixed)
//! - `config` - Engine configuration
//! - `engine` - Facade tying it all together

pub mod config;
pub mod engine;
pub mod history;
pub mod location;
pub mod model;
pub mod sensors;
pub mod source;
pub mod threat;

/// Round half away from zero to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(87.304), 87.3);
        assert_eq!(round2(12.5), 12.5);
        assert_eq!(round2(18.0), 18.0);
        assert_eq!(round2(round2(42.4242)), 42.42);
    }
}
