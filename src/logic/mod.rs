//! Logic Module - KDD Cup 1999 data preparation
//!
//! - `schema/` - column layout, attack-family table
//! - `dataset/` - in-memory table, CSV/gzip loader, CSV export
//! - `targets/` - binary and family targets from the raw label
//! - `features/` - feature partition, constant-column filter, preprocessing
//! - `sampling` - seeded stratified split/sample
//! - `metrics/` - detector evaluation helpers
//! - `analysis/` - z-score outliers, service attack ratios, correlations
//! - `report/` - distribution summary and run report

pub mod schema;
pub mod dataset;
pub mod targets;
pub mod features;
pub mod sampling;
pub mod metrics;
pub mod analysis;
pub mod report;
