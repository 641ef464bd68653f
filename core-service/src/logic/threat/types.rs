//! Threat Types
//!
//! Core types cho threat fusion & classification.
//! KHÔNG chứa logic - chỉ data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// THREAT LEVEL
// ============================================================================

/// Discrete threat classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatLevel {
    /// Area cleared, no immediate threat
    Low,
    /// Routine monitoring
    Moderate,
    /// Enhanced monitoring
    High,
    /// Immediate action required
    Critical,
}

impl ThreatLevel {
    /// Highest severity first
    pub const ALL: [ThreatLevel; 4] = [
        ThreatLevel::Critical,
        ThreatLevel::High,
        ThreatLevel::Moderate,
        ThreatLevel::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Critical => "CRITICAL",
            ThreatLevel::High => "HIGH",
            ThreatLevel::Moderate => "MODERATE",
            ThreatLevel::Low => "LOW",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ThreatLevel::Critical => "#dc2626", // Red
            ThreatLevel::High => "#f59e0b",     // Amber
            ThreatLevel::Moderate => "#10b981", // Green
            ThreatLevel::Low => "#3b82f6",      // Blue
        }
    }

    pub fn descriptor(&self) -> &'static str {
        match self {
            ThreatLevel::Critical => "Immediate Action Required",
            ThreatLevel::High => "Enhanced Monitoring",
            ThreatLevel::Moderate => "Routine Monitoring",
            ThreatLevel::Low => "Area Cleared",
        }
    }
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CORRELATION BONUS
// ============================================================================

/// Cross-sensor correlation patterns that raise the fused score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationKind {
    FumeMetal,
    CvAgreement,
    ThermalFume,
    DisturbanceGpr,
    MultiSensorHigh,
}

/// A bonus that fired during fusion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedBonus {
    pub kind: CorrelationKind,
    pub points: f64,
    pub reason: String,
}

// ============================================================================
// FUSION SCORE
// ============================================================================

/// Breakdown of how the fused probability was calculated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionScore {
    /// Weighted sum of the raw readings (2dp)
    pub base_score: f64,
    pub bonuses: Vec<AppliedBonus>,
    pub bonus_total: f64,
    /// min(100, base + bonuses), 2dp
    pub probability: f64,
}

impl FusionScore {
    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn has_bonus(&self, kind: CorrelationKind) -> bool {
        self.bonuses.iter().any(|b| b.kind == kind)
    }
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Level + display token + one-line descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub level: ThreatLevel,
    pub color: &'static str,
    pub descriptor: &'static str,
}

impl From<ThreatLevel> for Classification {
    fn from(level: ThreatLevel) -> Self {
        Self {
            level,
            color: level.color(),
            descriptor: level.descriptor(),
        }
    }
}
