//! KDD Cup 1999 intrusion data preparation
//!
//! Loads the 42-column connection records, derives the binary and
//! attack-family targets, separates model features and filters constant
//! columns. Evaluation and reporting helpers sit on top.

pub mod config;
pub mod constants;
pub mod error;
pub mod logic;

pub use config::{CompressionMode, Config};
pub use error::{KddError, KddResult};
pub use logic::dataset::{load_kdd, read_kdd, Compression, Table};
pub use logic::features::{split_features, ColumnPreprocessor, ConstantColumnFilter, FeaturePartition};
pub use logic::targets::{add_targets, TargetDeriver, UnknownLabelPolicy};
