//! History Ledger
//!
//! Append-only, in-memory log of evaluation records.
//! Insertion order = evaluation order; no reordering, no dedup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::location::LocationEntry;
use crate::logic::model::ModelPrediction;
use crate::logic::sensors::SensorVector;
use crate::logic::threat::ThreatLevel;

/// Compact timestamp embedded in scan ids
const SCAN_ID_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

// ============================================================================
// RECORDS
// ============================================================================

/// One evaluation, immutable once appended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub scan_id: String,
    pub timestamp: DateTime<Utc>,
    pub location: LocationEntry,
    pub sensors: SensorVector,
    pub probability: f64,
    pub threat_level: ThreatLevel,
    pub confidence: f64,
    /// Present only when a pluggable model was attached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelPrediction>,
}

/// Everything but the scan id, which only the ledger assigns
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub timestamp: DateTime<Utc>,
    pub location: LocationEntry,
    pub sensors: SensorVector,
    pub probability: f64,
    pub threat_level: ThreatLevel,
    pub confidence: f64,
    pub model: Option<ModelPrediction>,
}

// ============================================================================
// LEDGER
// ============================================================================

#[derive(Debug, Clone)]
pub struct HistoryLedger {
    prefix: String,
    records: Vec<EvaluationRecord>,
    counter: u64,
}

impl HistoryLedger {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            records: Vec::new(),
            counter: 0,
        }
    }

    /// The only mutator besides `clear`: assigns a scan id, bumps the
    /// counter, appends at the tail.
    pub fn append(&mut self, new: NewRecord) -> &EvaluationRecord {
        let scan_id = format_scan_id(&self.prefix, &new.timestamp, self.counter);
        self.counter += 1;

        self.records.push(EvaluationRecord {
            scan_id,
            timestamp: new.timestamp,
            location: new.location,
            sensors: new.sensors,
            probability: new.probability,
            threat_level: new.threat_level,
            confidence: new.confidence,
            model: new.model,
        });

        &self.records[self.records.len() - 1]
    }

    /// Full log, or the most recent `limit` records (oldest -> newest).
    /// A limit of 0 means "no limit".
    pub fn export(&self, limit: Option<usize>) -> &[EvaluationRecord] {
        match limit {
            Some(n) if n > 0 && n < self.records.len() => {
                &self.records[self.records.len() - n..]
            }
            _ => &self.records,
        }
    }

    pub fn records(&self) -> &[EvaluationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Evaluations appended since creation or last reset
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Full reset: drop every record, counter back to zero
    pub fn clear(&mut self) {
        self.records.clear();
        self.counter = 0;
    }
}

/// `PREFIX-<yyyyMMddHHmmss UTC>-<seq, zero-padded to 4>`
pub fn format_scan_id(prefix: &str, timestamp: &DateTime<Utc>, sequence: u64) -> String {
    format!(
        "{}-{}-{:04}",
        prefix,
        timestamp.format(SCAN_ID_TIME_FORMAT),
        sequence
    )
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::location::LocationRegistry;
    use crate::logic::sensors::SensorReadings;
    use chrono::TimeZone;

    fn new_record(probability: f64) -> NewRecord {
        NewRecord {
            timestamp: Utc.with_ymd_and_hms(2025, 11, 2, 8, 30, 15).unwrap(),
            location: LocationRegistry::default().entries()[0].clone(),
            sensors: SensorVector::new(SensorReadings::uniform(20.0)).unwrap(),
            probability,
            threat_level: ThreatLevel::Low,
            confidence: 100.0,
            model: None,
        }
    }

    #[test]
    fn test_scan_id_format() {
        let ts = Utc.with_ymd_and_hms(2025, 11, 2, 8, 30, 15).unwrap();
        assert_eq!(format_scan_id("NETRA", &ts, 7), "NETRA-20251102083015-0007");
        assert_eq!(format_scan_id("NETRA", &ts, 12345), "NETRA-20251102083015-12345");
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let mut ledger = HistoryLedger::new("NETRA");
        let first = ledger.append(new_record(10.0)).scan_id.clone();
        let second = ledger.append(new_record(20.0)).scan_id.clone();

        assert_eq!(first, "NETRA-20251102083015-0000");
        assert_eq!(second, "NETRA-20251102083015-0001");
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.counter(), 2);
    }

    #[test]
    fn test_export_limit_keeps_order() {
        let mut ledger = HistoryLedger::new("NETRA");
        for i in 0..5 {
            ledger.append(new_record(i as f64));
        }

        let recent = ledger.export(Some(2));
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].probability, 3.0);
        assert_eq!(recent[1].probability, 4.0);

        assert_eq!(ledger.export(None).len(), 5);
        assert_eq!(ledger.export(Some(0)).len(), 5);
        assert_eq!(ledger.export(Some(50)).len(), 5);
    }

    #[test]
    fn test_clear_resets_counter() {
        let mut ledger = HistoryLedger::new("NETRA");
        ledger.append(new_record(1.0));
        ledger.append(new_record(2.0));
        ledger.clear();

        assert!(ledger.is_empty());
        assert_eq!(ledger.counter(), 0);
        assert!(ledger.append(new_record(3.0)).scan_id.ends_with("-0000"));
    }
}
