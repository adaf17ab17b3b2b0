//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Every default can be overridden through the environment (see `config.rs`).

/// Default training file (10% KDD Cup 1999 subset)
pub const DEFAULT_TRAIN_PATH: &str = "data/kddcup.data_10_percent.gz";

/// Default test file (labelled "corrected" set)
pub const DEFAULT_TEST_PATH: &str = "data/corrected.gz";

/// Default directory for generated reports
pub const DEFAULT_REPORTS_DIR: &str = "reports";

/// Default fraction kept when sampling each split
pub const DEFAULT_SAMPLE_FRACTION: f64 = 0.5;

/// Default RNG seed for sampling
pub const DEFAULT_SEED: u64 = 42;

/// Default handling of attack labels missing from the family table
pub const DEFAULT_UNKNOWN_LABELS: &str = "warn";

/// Default compression mode (inferred from the file extension)
pub const DEFAULT_COMPRESSION: &str = "auto";

/// Services listed with their attack ratio in the distribution report
pub const DEFAULT_TOP_SERVICES: usize = 10;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "kdd-intrusion-core";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Read a string variable or use the default
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read and parse a variable, falling back to the default on absence or bad input
pub fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
