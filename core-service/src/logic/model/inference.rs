//! Pluggable Threat Models
//!
//! A model accepts `ModelFeatures` and returns a class label with a
//! per-class probability distribution. Its output rides alongside the
//! rule-based fusion result; it never replaces it.

use serde::{Deserialize, Serialize};

use super::features::{ModelFeatures, FEATURE_NAMES};
use crate::logic::threat::rules::{FusionWeights, FUME_METAL_BONUS, PROBABILITY_MAX};
use crate::logic::round2;
use crate::logic::threat::ThreatLevel;

// ============================================================================
// CONTRACT
// ============================================================================

/// Scorer that can stand in for (or supplement) the rule-based fusion
pub trait ThreatModel: Send + Sync {
    /// Short identifier reported as `method`
    fn name(&self) -> &str;

    fn predict(&self, features: &ModelFeatures) -> ModelPrediction;

    /// Static description of inputs and outputs
    fn info(&self) -> ModelInfo {
        ModelInfo {
            method: self.name().to_string(),
            features: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            classes: ThreatLevel::ALL.to_vec(),
        }
    }
}

/// Build a model from its configured name
pub fn model_by_name(name: &str) -> Option<Box<dyn ThreatModel>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "heuristic" => Some(Box::new(HeuristicModel::default())),
        _ => None,
    }
}

/// What a model consumes and which labels it can emit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub method: String,
    pub features: Vec<String>,
    /// Highest severity first
    pub classes: Vec<ThreatLevel>,
}

/// Share of the model score attributable to one feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub feature: String,
    pub value: f64,
    pub contribution: f64,
}

/// Per-class probability distribution (sums to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub critical: f64,
    pub high: f64,
    pub moderate: f64,
    pub low: f64,
}

impl ClassProbabilities {
    pub fn get(&self, level: ThreatLevel) -> f64 {
        match level {
            ThreatLevel::Critical => self.critical,
            ThreatLevel::High => self.high,
            ThreatLevel::Moderate => self.moderate,
            ThreatLevel::Low => self.low,
        }
    }

    pub fn sum(&self) -> f64 {
        self.critical + self.high + self.moderate + self.low
    }

    /// Most likely class; ties go to the more severe level
    pub fn most_likely(&self) -> ThreatLevel {
        let mut best = ThreatLevel::Critical;
        for level in ThreatLevel::ALL {
            if self.get(level) > self.get(best) {
                best = level;
            }
        }
        best
    }
}

/// Prediction output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPrediction {
    pub label: ThreatLevel,
    pub probabilities: ClassProbabilities,
    pub method: String,
    /// Largest contributors first; empty when the model cannot attribute
    #[serde(default)]
    pub feature_contributions: Vec<FeatureContribution>,
}

impl ModelPrediction {
    pub fn from_distribution(probabilities: ClassProbabilities, method: &str) -> Self {
        Self {
            label: probabilities.most_likely(),
            probabilities,
            method: method.to_string(),
            feature_contributions: Vec::new(),
        }
    }

    pub fn with_contributions(mut self, contributions: Vec<FeatureContribution>) -> Self {
        self.feature_contributions = contributions;
        self
    }

    /// Probability (0-100) assigned to the predicted label
    pub fn label_probability(&self) -> f64 {
        self.probabilities.get(self.label) * 100.0
    }
}

// ============================================================================
// FALLBACK HEURISTIC
// ============================================================================

/// Points per indicator channel above 60
const INDICATOR_POINTS: f64 = 1.5;

/// Contributions reported per prediction
const TOP_CONTRIBUTIONS: usize = 5;

/// Band midpoints used as class prototypes
const BAND_CENTERS: [(ThreatLevel, f64); 4] = [
    (ThreatLevel::Critical, 87.5),
    (ThreatLevel::High, 62.5),
    (ThreatLevel::Moderate, 37.5),
    (ThreatLevel::Low, 12.5),
];

/// Deterministic fallback used when no trained model is available.
///
/// Scores the features with the fusion weights plus the derived flags, then
/// turns the distance to each band midpoint into a softmax distribution.
#[derive(Debug, Clone)]
pub struct HeuristicModel {
    weights: FusionWeights,
    temperature: f64,
}

impl Default for HeuristicModel {
    fn default() -> Self {
        Self {
            weights: FusionWeights::default(),
            temperature: 8.0,
        }
    }
}

impl HeuristicModel {
    pub fn new(weights: FusionWeights, temperature: f64) -> Self {
        Self {
            weights,
            temperature: temperature.max(f64::EPSILON),
        }
    }

    /// Heuristic score on the 0-100 scale
    pub fn score(&self, f: &ModelFeatures) -> f64 {
        let raw: f64 = self.terms(f).iter().map(|(_, _, c)| c).sum();
        raw.clamp(0.0, PROBABILITY_MAX)
    }

    /// (feature, value, points) for every scored feature
    fn terms(&self, f: &ModelFeatures) -> [(&'static str, f64, f64); 9] {
        let w = &self.weights;
        [
            ("fume", f.fume, f.fume * w.fume),
            ("metal", f.metal, f.metal * w.metal),
            ("gpr", f.gpr, f.gpr * w.gpr),
            ("ground_cv", f.ground_cv, f.ground_cv * w.ground_cv),
            ("drone_cv", f.drone_cv, f.drone_cv * w.drone_cv),
            ("disturbance", f.disturbance, f.disturbance * w.disturbance),
            ("thermal", f.thermal, f.thermal * w.thermal),
            ("high_fume_metal", f.high_fume_metal, f.high_fume_metal * FUME_METAL_BONUS),
            (
                "multiple_indicators",
                f.multiple_indicators,
                f.multiple_indicators * INDICATOR_POINTS,
            ),
        ]
    }

    /// Non-zero terms, largest first
    pub fn contributions(&self, f: &ModelFeatures) -> Vec<FeatureContribution> {
        let mut terms: Vec<_> = self
            .terms(f)
            .into_iter()
            .filter(|(_, _, points)| *points > 0.0)
            .collect();
        terms.sort_by(|a, b| b.2.total_cmp(&a.2));

        terms
            .into_iter()
            .take(TOP_CONTRIBUTIONS)
            .map(|(feature, value, points)| FeatureContribution {
                feature: feature.to_string(),
                value,
                contribution: round2(points),
            })
            .collect()
    }
}

impl ThreatModel for HeuristicModel {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn predict(&self, features: &ModelFeatures) -> ModelPrediction {
        let score = self.score(features);

        let logits = BAND_CENTERS.map(|(level, center)| (level, -(score - center).abs() / self.temperature));
        // subtract max for numerical stability
        let max = logits.iter().map(|(_, l)| *l).fold(f64::NEG_INFINITY, f64::max);
        let exps = logits.map(|(level, l)| (level, (l - max).exp()));
        let total: f64 = exps.iter().map(|(_, e)| e).sum();

        let mut probs = ClassProbabilities::default();
        for (level, e) in exps {
            let p = e / total;
            match level {
                ThreatLevel::Critical => probs.critical = p,
                ThreatLevel::High => probs.high = p,
                ThreatLevel::Moderate => probs.moderate = p,
                ThreatLevel::Low => probs.low = p,
            }
        }

        ModelPrediction::from_distribution(probs, self.name())
            .with_contributions(self.contributions(features))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::sensors::{SensorReadings, SensorVector};

    fn features(values: [f64; 7]) -> ModelFeatures {
        ModelFeatures::extract(&SensorVector::new(SensorReadings::from_array(values)).unwrap())
    }

    #[test]
    fn test_distribution_sums_to_one() {
        let model = HeuristicModel::default();
        for v in [0.0, 20.0, 45.0, 70.0, 100.0] {
            let prediction = model.predict(&features([v; 7]));
            assert!((prediction.probabilities.sum() - 1.0).abs() < 1e-9);
            assert_eq!(prediction.method, "heuristic");
        }
    }

    #[test]
    fn test_labels_follow_signal_strength() {
        let model = HeuristicModel::default();
        assert_eq!(model.predict(&features([5.0; 7])).label, ThreatLevel::Low);
        assert_eq!(model.predict(&features([95.0; 7])).label, ThreatLevel::Critical);
        assert_eq!(model.predict(&features([40.0; 7])).label, ThreatLevel::Moderate);
    }

    #[test]
    fn test_deterministic() {
        let model = HeuristicModel::default();
        let f = features([80.0, 75.0, 70.0, 65.0, 60.0, 55.0, 50.0]);
        assert_eq!(model.predict(&f), model.predict(&f));
    }

    #[test]
    fn test_contributions_ranked_and_capped() {
        let model = HeuristicModel::default();
        let prediction = model.predict(&features([80.0, 75.0, 70.0, 65.0, 60.0, 55.0, 50.0]));
        let top = &prediction.feature_contributions;

        assert_eq!(top.len(), TOP_CONTRIBUTIONS);
        // fume 80 * 0.20 = 16 leads, the fume+metal flag (12) follows closely
        assert_eq!(top[0].feature, "fume");
        assert_eq!(top[0].contribution, 16.0);
        assert!(top.windows(2).all(|w| w[0].contribution >= w[1].contribution));
        assert!(top.iter().any(|c| c.feature == "high_fume_metal"));
    }

    #[test]
    fn test_zero_readings_have_no_contributions() {
        let prediction = HeuristicModel::default().predict(&features([0.0; 7]));
        assert!(prediction.feature_contributions.is_empty());
    }

    #[test]
    fn test_model_by_name() {
        let model = model_by_name(" Heuristic ").unwrap();
        let info = model.info();
        assert_eq!(info.method, "heuristic");
        assert_eq!(info.features.len(), FEATURE_NAMES.len());
        assert_eq!(info.classes[0], ThreatLevel::Critical);
        assert!(model_by_name("onnx").is_none());
    }

    #[test]
    fn test_most_likely_prefers_severe_on_tie() {
        let probs = ClassProbabilities {
            critical: 0.4,
            high: 0.4,
            moderate: 0.1,
            low: 0.1,
        };
        assert_eq!(probs.most_likely(), ThreatLevel::Critical);
        let prediction = ModelPrediction::from_distribution(probs, "test");
        assert!((prediction.label_probability() - 40.0).abs() < 1e-9);
    }
}
