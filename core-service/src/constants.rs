//! Central Configuration Constants
//!
//! Single source of truth for engine defaults.
//! Every default can be overridden through the environment.

/// Prefix of every scan identifier
pub const DEFAULT_SCAN_PREFIX: &str = "NETRA";

/// Records returned by "recent history" when the caller gives no limit
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "N.E.T.R.A.";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get scan id prefix from environment or use default
pub fn get_scan_prefix() -> String {
    std::env::var("NETRA_SCAN_PREFIX")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SCAN_PREFIX.to_string())
}

/// Get default history limit from environment or use default
pub fn get_history_limit() -> usize {
    std::env::var("NETRA_HISTORY_LIMIT")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
}

/// Name of the model scorer to attach (unset = rule-based only)
pub fn get_model_name() -> Option<String> {
    std::env::var("NETRA_MODEL")
        .ok()
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
}

/// Seed for synthetic sensor generation (unset = entropy)
pub fn get_random_seed() -> Option<u64> {
    std::env::var("NETRA_RANDOM_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
}
