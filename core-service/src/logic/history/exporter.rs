//! Flat Export
//!
//! Ledger records -> tabular rows (one per record), plus file writers.
//! Export on an empty ledger is an error, never an empty artifact.

use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use super::ledger::EvaluationRecord;
use crate::error::{EngineError, EngineResult};
use crate::logic::sensors::SensorChannel;
use crate::logic::threat::ThreatLevel;

/// Timestamp layout of the flat artifact
pub const FLAT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Exact column order of the flat artifact
pub const FLAT_HEADER: [&str; 13] = [
    "scan_id",
    "timestamp",
    "location",
    "probability",
    "threat_level",
    "confidence",
    "fume",
    "metal",
    "gpr",
    "ground_cv",
    "drone_cv",
    "disturbance",
    "thermal",
];

// ============================================================================
// EXPORT FORMATS
// ============================================================================

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Header row + one line per record
    Csv,
    /// Pretty JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "jsonl" => Ok(ExportFormat::Jsonl),
            other => Err(format!("unsupported export format: {} (csv, json, jsonl)", other)),
        }
    }
}

// ============================================================================
// FLAT ROWS
// ============================================================================

/// One record flattened for spreadsheets / training pipelines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatRow {
    pub scan_id: String,
    pub timestamp: String,
    pub location: String,
    pub probability: f64,
    pub threat_level: ThreatLevel,
    pub confidence: f64,
    pub fume: f64,
    pub metal: f64,
    pub gpr: f64,
    pub ground_cv: f64,
    pub drone_cv: f64,
    pub disturbance: f64,
    pub thermal: f64,
}

impl From<&EvaluationRecord> for FlatRow {
    fn from(record: &EvaluationRecord) -> Self {
        let r = record.sensors.readings();
        Self {
            scan_id: record.scan_id.clone(),
            timestamp: record.timestamp.format(FLAT_TIME_FORMAT).to_string(),
            location: record.location.name.clone(),
            probability: record.probability,
            threat_level: record.threat_level,
            confidence: record.confidence,
            fume: r.fume,
            metal: r.metal,
            gpr: r.gpr,
            ground_cv: r.ground_cv,
            drone_cv: r.drone_cv,
            disturbance: r.disturbance,
            thermal: r.thermal,
        }
    }
}

impl FlatRow {
    /// Cells in `FLAT_HEADER` order
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.scan_id.clone(),
            self.timestamp.clone(),
            self.location.clone(),
            self.probability.to_string(),
            self.threat_level.to_string(),
            self.confidence.to_string(),
        ];
        cells.extend(SensorChannel::ALL.iter().map(|&c| self.sensor(c).to_string()));
        cells
    }

    fn sensor(&self, channel: SensorChannel) -> f64 {
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
}

/// Flatten every record; fails on an empty ledger
pub fn flatten(records: &[EvaluationRecord]) -> EngineResult<Vec<FlatRow>> {
    if records.is_empty() {
        return Err(EngineError::EmptyHistory);
    }
    Ok(records.iter().map(FlatRow::from).collect())
}

// ============================================================================
// WRITERS
// ============================================================================

/// Write header + rows as CSV
pub fn write_csv<W: Write>(out: &mut W, rows: &[FlatRow]) -> std::io::Result<()> {
    writeln!(out, "{}", FLAT_HEADER.join(","))?;

    for row in rows {
        let line: Vec<String> = row.cells().iter().map(|c| escape_csv(c)).collect();
        writeln!(out, "{}", line.join(","))?;
    }

    Ok(())
}

/// CSV text in memory
pub fn to_csv_string(rows: &[FlatRow]) -> String {
    let mut buf = Vec::new();
    // writing into a Vec cannot fail
    let _ = write_csv(&mut buf, rows);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write rows to `destination`, returns the row count
pub fn export_rows(rows: &[FlatRow], destination: &Path, format: ExportFormat) -> EngineResult<usize> {
    if rows.is_empty() {
        return Err(EngineError::EmptyHistory);
    }

    let mut file = std::io::BufWriter::new(std::fs::File::create(destination)?);

    match format {
        ExportFormat::Csv => write_csv(&mut file, rows)?,
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut file, rows)?;
            writeln!(file)?;
        }
        ExportFormat::Jsonl => {
            for row in rows {
                serde_json::to_writer(&mut file, row)?;
                writeln!(file)?;
            }
        }
    }

    file.flush()?;
    log::info!("Exported {} records to {:?}", rows.len(), destination);
    Ok(rows.len())
}

/// Quote fields containing separators, quotes or line breaks
fn escape_csv(field: &str) -> String {
    if field.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::history::ledger::{HistoryLedger, NewRecord};
    use crate::logic::location::LocationRegistry;
    use crate::logic::sensors::{SensorReadings, SensorVector};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn ledger_with(n: usize) -> HistoryLedger {
        let mut ledger = HistoryLedger::new("NETRA");
        let registry = LocationRegistry::default();
        for i in 0..n {
            ledger.append(NewRecord {
                timestamp: Utc.with_ymd_and_hms(2025, 11, 2, 9, 5, i as u32).unwrap(),
                location: registry.entries()[i % registry.len()].clone(),
                sensors: SensorVector::new(SensorReadings::from_array([
                    80.0, 75.0, 70.0, 65.0, 60.0, 55.0, 50.0,
                ]))
                .unwrap(),
                probability: 87.3,
                threat_level: ThreatLevel::Critical,
                confidence: 90.0,
                model: None,
            });
        }
        ledger
    }

    #[test]
    fn test_flatten_empty_fails() {
        assert!(matches!(flatten(&[]), Err(EngineError::EmptyHistory)));
    }

    #[test]
    fn test_flat_row_layout() {
        let ledger = ledger_with(1);
        let rows = flatten(ledger.records()).unwrap();
        let row = &rows[0];

        assert_eq!(row.timestamp, "2025-11-02 09:05:00");
        assert_eq!(row.location, "Guwahati Airport Road, Assam");
        assert_eq!(row.cells().len(), FLAT_HEADER.len());
        assert_eq!(row.cells()[4], "CRITICAL");
        assert_eq!(row.cells()[6], "80");
    }

    #[test]
    fn test_csv_header_and_quoting() {
        let ledger = ledger_with(2);
        let csv = to_csv_string(&flatten(ledger.records()).unwrap());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "scan_id,timestamp,location,probability,threat_level,confidence,fume,metal,gpr,ground_cv,drone_cv,disturbance,thermal"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with(
            "NETRA-20251102090500-0000,2025-11-02 09:05:00,\"Guwahati Airport Road, Assam\",87.3,CRITICAL,90,"
        ));
    }

    #[test]
    fn test_export_to_files() {
        let temp_dir = TempDir::new().unwrap();
        let ledger = ledger_with(3);
        let rows = flatten(ledger.records()).unwrap();

        let csv_path = temp_dir.path().join("log.csv");
        assert_eq!(export_rows(&rows, &csv_path, ExportFormat::Csv).unwrap(), 3);
        let content = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(content.lines().count(), 4);

        let jsonl_path = temp_dir.path().join("log.jsonl");
        export_rows(&rows, &jsonl_path, ExportFormat::Jsonl).unwrap();
        let content = std::fs::read_to_string(&jsonl_path).unwrap();
        for line in content.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["threat_level"], "CRITICAL");
        }

        let json_path = temp_dir.path().join("log.json");
        export_rows(&rows, &json_path, ExportFormat::Json).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_export_empty_creates_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.csv");
        assert!(matches!(
            export_rows(&[], &path, ExportFormat::Csv),
            Err(EngineError::EmptyHistory)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("jsonl".parse::<ExportFormat>().unwrap(), ExportFormat::Jsonl);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }
}
