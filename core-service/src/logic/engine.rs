//! Threat Engine - Evaluation Facade
//!
//! Owns the ledger, the synthetic sources and the optional model.
//! Location registry is shared and read-only.
//!
//! ## Flow
//! location -> validation -> fusion -> classification -> confidence -> ledger
//!
//! Any failure before the ledger step leaves history untouched.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::history::{self, EvaluationRecord, ExportFormat, FlatRow, HistoryLedger, NewRecord, Statistics};
use super::location::{LocationEntry, LocationRegistry};
use super::model::{model_by_name, ModelFeatures, ModelInfo, ModelPrediction, ThreatModel};
use super::sensors::SensorVector;
use super::source::{RandomSource, SamplingMode, SensorSource};
use super::threat::{
    classifier,
    confidence,
    fuse_with_weights,
    recommendations,
    ClassificationThresholds,
    FusionScore,
    FusionWeights,
    ThreatLevel,
};
use crate::error::EngineResult;

/// Engine shared between request handlers
pub type SharedEngine = Arc<Mutex<ThreatEngine>>;

// ============================================================================
// ASSESSMENT
// ============================================================================

/// Caller-facing result of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatAssessment {
    pub scan_id: String,
    /// ISO-8601, UTC
    pub timestamp: String,
    pub location: LocationEntry,
    pub sensors: SensorVector,
    pub probability: f64,
    pub threat_level: ThreatLevel,
    pub color: String,
    pub descriptor: String,
    pub confidence: f64,
    pub recommendations: Vec<String>,
    /// Base score and applied correlation bonuses (fresh evaluations only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fusion: Option<FusionScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelPrediction>,
}

impl ThreatAssessment {
    /// Rebuild the caller-facing view of a stored record
    pub fn from_record(record: &EvaluationRecord) -> Self {
        let level = record.threat_level;
        Self {
            scan_id: record.scan_id.clone(),
            timestamp: record.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            location: record.location.clone(),
            sensors: record.sensors,
            probability: record.probability,
            threat_level: level,
            color: level.color().to_string(),
            descriptor: level.descriptor().to_string(),
            confidence: record.confidence,
            recommendations: recommendations(level).iter().map(|s| s.to_string()).collect(),
            fusion: None,
            model: record.model.clone(),
        }
    }

    fn with_fusion(mut self, score: FusionScore) -> Self {
        self.fusion = Some(score);
        self
    }
}

// ============================================================================
// ENGINE
// ============================================================================

pub struct ThreatEngine {
    config: EngineConfig,
    weights: FusionWeights,
    thresholds: ClassificationThresholds,
    registry: Arc<LocationRegistry>,
    ledger: HistoryLedger,
    batch_source: Box<dyn SensorSource>,
    live_source: Box<dyn SensorSource>,
    model: Option<Box<dyn ThreatModel>>,
}

impl ThreatEngine {
    /// Built-in registry, default weights, random sources seeded from config.
    /// A configured model name attaches that model; unknown names are ignored.
    pub fn new(config: EngineConfig) -> Self {
        let seed = config.random_seed;
        let model = config.model.as_deref().and_then(|name| {
            let model = model_by_name(name);
            if model.is_none() {
                log::warn!("[Engine] Unknown model '{}', running rules only", name);
            }
            model
        });
        Self {
            weights: FusionWeights::default(),
            thresholds: ClassificationThresholds::default(),
            registry: Arc::new(LocationRegistry::northeast_india()),
            ledger: HistoryLedger::new(config.scan_prefix.clone()),
            batch_source: Box::new(RandomSource::from_seed(SamplingMode::Batch, seed)),
            // offset so live and batch streams differ under the same seed
            live_source: Box::new(RandomSource::from_seed(
                SamplingMode::Live,
                seed.map(|s| s.wrapping_add(1)),
            )),
            model,
            config,
        }
    }

    pub fn with_registry(mut self, registry: Arc<LocationRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Rejects weights that are negative or do not sum to 1.0
    pub fn with_weights(mut self, weights: FusionWeights) -> EngineResult<Self> {
        weights.validate()?;
        self.weights = weights;
        Ok(self)
    }

    /// Source used by `batch_evaluate`
    pub fn with_source(mut self, source: Box<dyn SensorSource>) -> Self {
        self.batch_source = source;
        self
    }

    /// Source used by `sample_live`
    pub fn with_live_source(mut self, source: Box<dyn SensorSource>) -> Self {
        self.live_source = source;
        self
    }

    pub fn with_model(mut self, model: Box<dyn ThreatModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn into_shared(self) -> SharedEngine {
        Arc::new(Mutex::new(self))
    }

    // ------------------------------------------------------------------------
    // Evaluation
    // ------------------------------------------------------------------------

    /// Evaluate validated readings at a known location
    pub fn evaluate(&mut self, location_key: &str, sensors: SensorVector) -> EngineResult<ThreatAssessment> {
        self.evaluate_at(location_key, sensors, Utc::now())
    }

    /// Evaluate an untyped sensor mapping (key set, then type and range per channel)
    pub fn evaluate_json(
        &mut self,
        location_key: &str,
        sensors: &serde_json::Value,
    ) -> EngineResult<ThreatAssessment> {
        // unknown location wins over bad readings
        self.registry.resolve(location_key)?;
        let sensors = SensorVector::from_json(sensors)?;
        self.evaluate_at(location_key, sensors, Utc::now())
    }

    /// Evaluation with an explicit timestamp
    pub fn evaluate_at(
        &mut self,
        location_key: &str,
        sensors: SensorVector,
        timestamp: DateTime<Utc>,
    ) -> EngineResult<ThreatAssessment> {
        let location = self.registry.resolve(location_key)?.clone();

        let score = fuse_with_weights(&sensors, &self.weights);
        let probability = score.probability();
        let level = classifier::level_for(probability, &self.thresholds);
        let confidence = confidence(&sensors);
        let model = self
            .model
            .as_ref()
            .map(|m| m.predict(&ModelFeatures::extract(&sensors)));

        let record = self.ledger.append(NewRecord {
            timestamp,
            location,
            sensors,
            probability,
            threat_level: level,
            confidence,
            model,
        });

        log::debug!(
            "[Engine] {} @ {}: {:.2}% {} (confidence {:.2})",
            record.scan_id,
            record.location.key,
            probability,
            level,
            confidence
        );
        if level == ThreatLevel::Critical {
            log::warn!(
                "[Engine] CRITICAL threat at {} ({}): {:.2}%",
                record.location.name,
                record.scan_id,
                probability
            );
        }

        Ok(ThreatAssessment::from_record(record).with_fusion(score))
    }

    /// Evaluate every registered location (or the given subset, in order)
    /// with readings drawn from the batch source.
    ///
    /// All keys are resolved before anything is evaluated, so an unknown key
    /// leaves the ledger untouched.
    pub fn batch_evaluate<S: AsRef<str>>(&mut self, keys: Option<&[S]>) -> EngineResult<Vec<ThreatAssessment>> {
        let keys: Vec<String> = match keys {
            Some(keys) => {
                for key in keys {
                    self.registry.resolve(key.as_ref())?;
                }
                keys.iter().map(|k| k.as_ref().to_string()).collect()
            }
            None => self.registry.keys().into_iter().map(String::from).collect(),
        };

        let mut results = Vec::with_capacity(keys.len());
        for key in &keys {
            let sensors = self.batch_source.next_vector();
            results.push(self.evaluate(key, sensors)?);
        }

        let critical = results
            .iter()
            .filter(|r| r.threat_level == ThreatLevel::Critical)
            .count();
        log::info!(
            "[Engine] Batch complete: {} locations, {} critical",
            results.len(),
            critical
        );
        Ok(results)
    }

    /// One simulated live reading (not recorded)
    pub fn sample_live(&mut self) -> SensorVector {
        self.live_source.next_vector()
    }

    // ------------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------------

    /// Oldest -> newest; `None` or `Some(0)` returns everything
    pub fn history(&self, limit: Option<usize>) -> Vec<ThreatAssessment> {
        self.ledger
            .export(limit)
            .iter()
            .map(ThreatAssessment::from_record)
            .collect()
    }

    /// History capped at the configured default limit
    pub fn recent(&self) -> Vec<ThreatAssessment> {
        self.history(Some(self.config.default_history_limit))
    }

    pub fn records(&self) -> &[EvaluationRecord] {
        self.ledger.records()
    }

    pub fn statistics(&self) -> Statistics {
        history::summarize(self.ledger.records())
    }

    /// Fails with `EmptyHistory` when nothing has been evaluated
    pub fn export_flat(&self) -> EngineResult<Vec<FlatRow>> {
        history::flatten(self.ledger.records())
    }

    /// Write the flat artifact; returns the number of rows written
    pub fn export_to_file(&self, destination: &Path, format: ExportFormat) -> EngineResult<usize> {
        let rows = self.export_flat()?;
        history::export_rows(&rows, destination, format)
    }

    pub fn evaluation_count(&self) -> u64 {
        self.ledger.counter()
    }

    /// Drop all history and restart scan numbering
    pub fn reset(&mut self) {
        let dropped = self.ledger.len();
        self.ledger.clear();
        log::info!("[Engine] History reset ({} records dropped)", dropped);
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn weights(&self) -> &FusionWeights {
        &self.weights
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model.as_ref().map(|m| m.name())
    }

    /// None when running rules only
    pub fn model_info(&self) -> Option<ModelInfo> {
        self.model.as_ref().map(|m| m.info())
    }
}

impl Default for ThreatEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================
