//! Metrics Module - Evaluation of detector outputs
//!
//! - `classification` - binary confusion counts, ROC AUC, multiclass matrix
//! - `threshold` - F1-optimal decision threshold sweep

pub mod classification;
pub mod threshold;

pub use classification::{confusion_matrix, roc_auc, BinaryConfusion};
pub use threshold::{find_best_threshold, ThresholdSearch, ThresholdSweep};
