//! History Module
//!
//! Process-lifetime record of every evaluation.
//!
//! ## Structure
//! - `ledger.rs` - Append-only log + scan id sequencing
//! - `stats.rs` - Counts / averages over the log
//! - `exporter.rs` - Flat rows (CSV, JSON, JSONL)

pub mod ledger;
pub mod stats;
pub mod exporter;

pub use ledger::{format_scan_id, EvaluationRecord, HistoryLedger, NewRecord};
pub use stats::{summarize, Statistics};
pub use exporter::{
    export_rows,
    flatten,
    to_csv_string,
    write_csv,
    ExportFormat,
    FlatRow,
    FLAT_HEADER,
};
