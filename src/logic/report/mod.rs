//! Report Module - Target distribution check
//!
//! - `types` - serialisable summary and run report
//! - `summary` - per-split counts, input fingerprints, JSON output

pub mod types;
pub mod summary;

pub use summary::{fingerprint_file, log_summary, summarize_split, write_report};
pub use types::{Counts, DistributionSummary, InputFingerprint, RunReport};
