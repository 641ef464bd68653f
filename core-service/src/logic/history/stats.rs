//! Statistics Aggregator
//!
//! Pure read over ledger records.

use serde::{Deserialize, Serialize};

use super::ledger::EvaluationRecord;
use crate::logic::round2;
use crate::logic::threat::ThreatLevel;

/// Summary counts and averages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub moderate: usize,
    pub low: usize,
    /// 0 on an empty ledger, never NaN
    pub avg_probability: f64,
    pub avg_confidence: f64,
}

impl Statistics {
    pub fn count(&self, level: ThreatLevel) -> usize {
        match level {
            ThreatLevel::Critical => self.critical,
            ThreatLevel::High => self.high,
            ThreatLevel::Moderate => self.moderate,
            ThreatLevel::Low => self.low,
        }
    }
}

/// Counts per stored level, means rounded to 2dp
pub fn summarize(records: &[EvaluationRecord]) -> Statistics {
    if records.is_empty() {
        return Statistics::default();
    }

    let mut stats = Statistics {
        total: records.len(),
        ..Default::default()
    };

    let mut probability_sum = 0.0;
    let mut confidence_sum = 0.0;

    for record in records {
        match record.threat_level {
            ThreatLevel::Critical => stats.critical += 1,
            ThreatLevel::High => stats.high += 1,
            ThreatLevel::Moderate => stats.moderate += 1,
            ThreatLevel::Low => stats.low += 1,
        }
        probability_sum += record.probability;
        confidence_sum += record.confidence;
    }

    let n = records.len() as f64;
    stats.avg_probability = round2(probability_sum / n);
    stats.avg_confidence = round2(confidence_sum / n);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::history::ledger::{HistoryLedger, NewRecord};
    use crate::logic::location::LocationRegistry;
    use crate::logic::sensors::{SensorReadings, SensorVector};
    use chrono::Utc;

    fn push(ledger: &mut HistoryLedger, probability: f64, level: ThreatLevel, confidence: f64) {
        ledger.append(NewRecord {
            timestamp: Utc::now(),
            location: LocationRegistry::default().entries()[1].clone(),
            sensors: SensorVector::new(SensorReadings::uniform(50.0)).unwrap(),
            probability,
            threat_level: level,
            confidence,
            model: None,
        });
    }

    #[test]
    fn test_empty_ledger_is_all_zero() {
        let stats = summarize(&[]);
        assert_eq!(stats, Statistics::default());
        assert_eq!(stats.avg_probability, 0.0);
        assert_eq!(stats.avg_confidence, 0.0);
        assert!(!stats.avg_probability.is_nan());
    }

    #[test]
    fn test_counts_and_means() {
        let mut ledger = HistoryLedger::new("T");
        push(&mut ledger, 87.3, ThreatLevel::Critical, 90.0);
        push(&mut ledger, 60.0, ThreatLevel::High, 80.0);
        push(&mut ledger, 30.0, ThreatLevel::Moderate, 70.0);
        push(&mut ledger, 10.0, ThreatLevel::Low, 100.0);
        push(&mut ledger, 12.0, ThreatLevel::Low, 95.5);

        let stats = summarize(ledger.records());
        assert_eq!(stats.total, 5);
        assert_eq!(stats.critical, 1);
        assert_eq!(stats.high, 1);
        assert_eq!(stats.moderate, 1);
        assert_eq!(stats.low, 2);
        assert_eq!(stats.count(ThreatLevel::Low), 2);
        // (87.3 + 60 + 30 + 10 + 12) / 5 = 39.86
        assert_eq!(stats.avg_probability, 39.86);
        // (90 + 80 + 70 + 100 + 95.5) / 5 = 87.1
        assert_eq!(stats.avg_confidence, 87.1);
    }
}
