//! Engine Configuration

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Prefix of generated scan ids
    pub scan_prefix: String,
    /// Used by callers that want "recent" history without naming a limit
    pub default_history_limit: usize,
    /// Seeds the synthetic sensor sources; None = entropy
    pub random_seed: Option<u64>,
    /// Model scorer attached at construction ("heuristic"); None = rules only
    #[serde(default)]
    pub model: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scan_prefix: constants::DEFAULT_SCAN_PREFIX.to_string(),
            default_history_limit: constants::DEFAULT_HISTORY_LIMIT,
            random_seed: None,
            model: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            scan_prefix: constants::get_scan_prefix(),
            default_history_limit: constants::get_history_limit(),
            random_seed: constants::get_random_seed(),
            model: constants::get_model_name(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_model(mut self, name: &str) -> Self {
        self.model = Some(name.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.scan_prefix, "NETRA");
        assert_eq!(config.default_history_limit, 50);
        assert_eq!(config.random_seed, None);
        assert_eq!(config.model, None);

        let tuned = config.with_seed(3).with_model("heuristic");
        assert_eq!(tuned.random_seed, Some(3));
        assert_eq!(tuned.model.as_deref(), Some("heuristic"));
    }
}
