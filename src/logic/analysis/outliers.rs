//! Z-score outliers
//!
//! Each value is scored as `(x - mean) / std` with the population standard
//! deviation of its column. A row is an outlier when any of its scores
//! exceeds the threshold in absolute value.

use ndarray::Array2;

use super::STD_EPSILON;
use crate::error::{KddError, KddResult};
use crate::logic::dataset::Table;

pub const DEFAULT_ZSCORE_THRESHOLD: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct OutlierScan {
    /// Scanned columns, in `zscores` column order
    pub columns: Vec<String>,
    /// One row per table row; NaN for missing values and zero-variance columns
    pub zscores: Array2<f64>,
    pub mask: Vec<bool>,
    /// Rows of the input table where `mask` is set
    pub outliers: Table,
}

impl OutlierScan {
    pub fn outlier_count(&self) -> usize {
        self.outliers.n_rows()
    }
}

pub fn zscore_outliers<S: AsRef<str>>(
    table: &Table,
    columns: &[S],
    threshold: f64,
) -> KddResult<OutlierScan> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(KddError::InvalidArgument(format!(
            "z-score threshold must be a finite non-negative number, got {}",
            threshold
        )));
    }

    let mut zscores = Array2::<f64>::from_elem((table.n_rows(), columns.len()), f64::NAN);

    for (j, name) in columns.iter().enumerate() {
        let values = table.require(name.as_ref())?.data.to_f64().ok_or_else(|| {
            KddError::InvalidArgument(format!("'{}' is not a numeric column", name.as_ref()))
        })?;

        let present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if present.is_empty() {
            continue;
        }
        let n = present.len() as f64;
        let mean = present.iter().sum::<f64>() / n;
        let std = (present.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
        if std <= STD_EPSILON {
            continue;
        }

        for (i, v) in values.iter().enumerate() {
            zscores[[i, j]] = (v - mean) / std;
        }
    }

    // NaN never compares greater, so missing scores never flag a row
    let mask: Vec<bool> = zscores
        .rows()
        .into_iter()
        .map(|row| row.iter().any(|z| z.abs() > threshold))
        .collect();
    let outliers = table.filter_rows(&mask)?;

    log::debug!(
        "Z-score scan over {} columns: {} of {} rows above {}",
        columns.len(),
        outliers.n_rows(),
        table.n_rows(),
        threshold
    );

    Ok(OutlierScan {
        columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
        zscores,
        mask,
        outliers,
    })
}
