//! Configuration module

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    env_or, env_parse_or, DEFAULT_COMPRESSION, DEFAULT_REPORTS_DIR, DEFAULT_SAMPLE_FRACTION,
    DEFAULT_SEED, DEFAULT_TEST_PATH, DEFAULT_TRAIN_PATH, DEFAULT_UNKNOWN_LABELS,
};
use crate::logic::dataset::Compression;
use crate::logic::targets::UnknownLabelPolicy;

/// How the compression of an input file is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionMode {
    /// Infer from the `.gz` suffix
    Auto,
    Gzip,
    None,
}

impl CompressionMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(CompressionMode::Auto),
            "gzip" | "gz" => Some(CompressionMode::Gzip),
            "none" | "plain" => Some(CompressionMode::None),
            _ => None,
        }
    }

    /// Resolve the mode for a concrete file
    pub fn resolve(&self, path: &std::path::Path) -> Compression {
        match self {
            CompressionMode::Auto => Compression::from_path(path),
            CompressionMode::Gzip => Compression::Gzip,
            CompressionMode::None => Compression::None,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Training data file
    pub train_path: PathBuf,

    /// Test data file
    pub test_path: PathBuf,

    /// Directory receiving generated reports
    pub reports_dir: PathBuf,

    /// Fraction of each split kept by the stratified sample
    pub sample_fraction: f64,

    /// Seed for the stratified sample
    pub seed: u64,

    /// What to do with attack labels absent from the family table
    pub unknown_labels: UnknownLabelPolicy,

    /// Compression of the input files
    pub compression: CompressionMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            train_path: PathBuf::from(DEFAULT_TRAIN_PATH),
            test_path: PathBuf::from(DEFAULT_TEST_PATH),
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            sample_fraction: DEFAULT_SAMPLE_FRACTION,
            seed: DEFAULT_SEED,
            unknown_labels: UnknownLabelPolicy::Warn,
            compression: CompressionMode::Auto,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let sample_fraction = env_parse_or("KDD_SAMPLE_FRACTION", DEFAULT_SAMPLE_FRACTION);
        let sample_fraction = if sample_fraction > 0.0 && sample_fraction <= 1.0 {
            sample_fraction
        } else {
            log::warn!(
                "KDD_SAMPLE_FRACTION={} outside (0, 1], using {}",
                sample_fraction,
                DEFAULT_SAMPLE_FRACTION
            );
            DEFAULT_SAMPLE_FRACTION
        };

        Self {
            train_path: PathBuf::from(env_or("KDD_TRAIN_PATH", DEFAULT_TRAIN_PATH)),
            test_path: PathBuf::from(env_or("KDD_TEST_PATH", DEFAULT_TEST_PATH)),
            reports_dir: PathBuf::from(env_or("KDD_REPORTS_DIR", DEFAULT_REPORTS_DIR)),
            sample_fraction,
            seed: env_parse_or("KDD_SEED", DEFAULT_SEED),
            unknown_labels: UnknownLabelPolicy::parse(&env_or(
                "KDD_UNKNOWN_LABELS",
                DEFAULT_UNKNOWN_LABELS,
            ))
            .unwrap_or(UnknownLabelPolicy::Warn),
            compression: CompressionMode::parse(&env_or("KDD_COMPRESSION", DEFAULT_COMPRESSION))
                .unwrap_or(CompressionMode::Auto),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.sample_fraction, 0.5);
        assert_eq!(config.unknown_labels, UnknownLabelPolicy::Warn);
        assert_eq!(config.compression, CompressionMode::Auto);
    }

    #[test]
    fn test_compression_mode_parse() {
        assert_eq!(CompressionMode::parse("GZIP"), Some(CompressionMode::Gzip));
        assert_eq!(CompressionMode::parse("none"), Some(CompressionMode::None));
        assert_eq!(CompressionMode::parse(" auto "), Some(CompressionMode::Auto));
        assert_eq!(CompressionMode::parse("zstd"), None);
    }

    #[test]
    fn test_compression_mode_resolve() {
        let gz = Path::new("data/corrected.gz");
        let plain = Path::new("data/corrected.csv");
        assert_eq!(CompressionMode::Auto.resolve(gz), Compression::Gzip);
        assert_eq!(CompressionMode::Auto.resolve(plain), Compression::None);
        assert_eq!(CompressionMode::Gzip.resolve(plain), Compression::Gzip);
        assert_eq!(CompressionMode::None.resolve(gz), Compression::None);
    }
}
