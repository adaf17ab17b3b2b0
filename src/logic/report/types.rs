//! Report Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::analysis::ServiceAttackRatio;
use crate::logic::schema::SchemaInfo;
use crate::logic::targets::LabelStats;

/// `(value, count)` pairs, most frequent first
pub type Counts = Vec<(String, usize)>;

/// Target distributions of one split, before and after sampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    /// Split name (`train`, `test`)
    pub split: String,
    pub rows: usize,
    pub columns: usize,
    pub labels: LabelStats,
    pub binary: Counts,
    pub family: Counts,
    pub attack_names: Counts,

    /// Most frequent services with their share of attack rows
    pub services: Vec<ServiceAttackRatio>,

    /// Rows kept by the stratified sample
    pub sampled_rows: usize,

    /// Rows left after multiclass preparation of the sample
    pub multiclass_rows: usize,
    pub multiclass: Counts,
}

/// Identity of an input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFingerprint {
    pub path: String,
    pub bytes: u64,
    pub sha256: String,
}

/// One run of the distribution check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub app_version: String,
    pub schema: SchemaInfo,
    pub sample_fraction: f64,
    pub seed: u64,
    pub inputs: Vec<InputFingerprint>,
    pub splits: Vec<DistributionSummary>,
}
