//! Feature partition
//!
//! Separates feature columns from label/target columns and routes each
//! feature to numeric or categorical preprocessing.

use crate::logic::dataset::Table;
use crate::logic::schema::{is_categorical, NON_FEATURE_COLUMNS};

#[derive(Debug, Clone, PartialEq)]
pub struct FeaturePartition {
    /// Input table minus label and derived target columns
    pub features: Table,
    /// Every feature column that is not categorical, in table order
    pub numeric: Vec<String>,
    /// The fixed categorical columns present in the table, in table order
    pub categorical: Vec<String>,
}

impl FeaturePartition {
    pub fn into_parts(self) -> (Table, Vec<String>, Vec<String>) {
        (self.features, self.numeric, self.categorical)
    }
}

/// Split a raw or derived table into its feature table and column groups.
/// Target columns that are absent are simply skipped.
pub fn split_features(table: &Table) -> FeaturePartition {
    let features = table.drop_columns(NON_FEATURE_COLUMNS);

    let (categorical, numeric): (Vec<String>, Vec<String>) = features
        .column_names()
        .into_iter()
        .map(str::to_string)
        .partition(|name| is_categorical(name));

    FeaturePartition {
        features,
        numeric,
        categorical,
    }
}
