//! Constant-column filter
//!
//! Two states: unfit (no recorded columns) and fit (frozen keep-list).
//! The keep-list is decided once from reference data and applied unchanged
//! to every later table so train and test matrices share a column shape.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KddError, KddResult};
use crate::logic::dataset::Table;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstantColumnFilter {
    keep_columns: Option<Vec<String>>,
}

impl ConstantColumnFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fitted(&self) -> bool {
        self.keep_columns.is_some()
    }

    /// Columns kept by the last fit, in table order
    pub fn kept_columns(&self) -> Option<&[String]> {
        self.keep_columns.as_deref()
    }

    /// Record the columns of `table` with more than one distinct value.
    /// Refitting replaces the previous keep-list.
    pub fn fit(&mut self, table: &Table) -> &mut Self {
        let (keep, dropped): (Vec<_>, Vec<_>) = table
            .columns()
            .iter()
            .partition(|c| c.n_unique() > 1);

        if !dropped.is_empty() {
            log::info!(
                "Dropping {} constant columns: {}",
                dropped.len(),
                dropped
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        self.keep_columns = Some(keep.into_iter().map(|c| c.name.clone()).collect());
        self
    }

    /// Restrict `table` to the recorded columns
    pub fn transform(&self, table: &Table) -> KddResult<Table> {
        let keep = self
            .keep_columns
            .as_ref()
            .ok_or(KddError::UninitializedTransform("ConstantColumnFilter"))?;
        table.select(keep)
    }

    pub fn fit_transform(&mut self, table: &Table) -> KddResult<Table> {
        self.fit(table).transform(table)
    }

    /// Persist the fitted keep-list as JSON
    pub fn save(&self, path: &Path) -> KddResult<()> {
        if !self.is_fitted() {
            return Err(KddError::UninitializedTransform("ConstantColumnFilter"));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a filter saved with [`save`](Self::save)
    pub fn load(path: &Path) -> KddResult<Self> {
        if !path.exists() {
            return Err(KddError::FileNotFound(path.to_path_buf()));
        }

        let data = fs::read(path)?;
        let filter: ConstantColumnFilter = serde_json::from_slice(&data)?;
        Ok(filter)
    }
}
