//! Correlation matrix
//!
//! Pearson correlation between every pair of numeric columns, computed over
//! the rows where both values are present. Pairs involving a zero-variance
//! column, or with fewer than two shared rows, are NaN.

use ndarray::{Array2, ArrayView1};

use super::STD_EPSILON;
use crate::error::KddResult;
use crate::logic::dataset::Table;

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    /// Numeric columns in table order
    pub columns: Vec<String>,
    pub values: Array2<f64>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[[i, j]])
    }
}

/// Correlate every numeric (integer or float) column of `table`
pub fn correlation_matrix(table: &Table) -> KddResult<CorrelationMatrix> {
    let numeric: Vec<(String, Vec<f64>)> = table
        .columns()
        .iter()
        .filter_map(|c| c.data.to_f64().map(|v| (c.name.clone(), v)))
        .collect();

    let k = numeric.len();
    let mut data = Array2::<f64>::zeros((table.n_rows(), k));
    for (j, (_, values)) in numeric.iter().enumerate() {
        for (i, v) in values.iter().enumerate() {
            data[[i, j]] = *v;
        }
    }

    let mut values = Array2::<f64>::from_elem((k, k), f64::NAN);
    for i in 0..k {
        for j in 0..=i {
            let r = pearson(data.column(i), data.column(j));
            // Self-correlation is exactly 1 wherever it is defined
            let r = if i == j && !r.is_nan() { 1.0 } else { r };
            values[[i, j]] = r;
            values[[j, i]] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: numeric.into_iter().map(|(name, _)| name).collect(),
        values,
    })
}

fn pearson(x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(&a, &b)| (a, b))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let x_mean = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let y_mean = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut x_var = 0.0;
    let mut y_var = 0.0;
    for (a, b) in &pairs {
        let dx = a - x_mean;
        let dy = b - y_mean;
        cov += dx * dy;
        x_var += dx * dx;
        y_var += dy * dy;
    }

    let x_std = (x_var / n).sqrt();
    let y_std = (y_var / n).sqrt();
    if x_std <= STD_EPSILON || y_std <= STD_EPSILON {
        return f64::NAN;
    }
    (cov / n) / (x_std * y_std)
}
