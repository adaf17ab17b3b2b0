//! Features Module - Feature preparation
//!
//! - `partition` - feature table + numeric/categorical column groups
//! - `constant` - fit-once filter dropping single-valued columns
//! - `preprocess` - scaling + one-hot encoding into an `ndarray` matrix

pub mod partition;
pub mod constant;
pub mod preprocess;


pub use constant::ConstantColumnFilter;
pub use partition::{split_features, FeaturePartition};
pub use preprocess::ColumnPreprocessor;
