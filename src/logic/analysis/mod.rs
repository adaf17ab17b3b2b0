//! Analysis Module - Exploratory statistics over loaded tables
//!
//! - `outliers` - population z-scores and a per-row outlier mask
//! - `service` - attack ratio of the most frequent services
//! - `correlation` - pairwise Pearson correlation of numeric columns

pub mod outliers;
pub mod service;
pub mod correlation;


pub use correlation::{correlation_matrix, CorrelationMatrix};
pub use outliers::{zscore_outliers, OutlierScan, DEFAULT_ZSCORE_THRESHOLD};
pub use service::{service_attack_ratio, ServiceAttackRatio};

/// Standard deviations below this count as zero
pub(crate) const STD_EPSILON: f64 = 1e-10;
