//! Column Preprocessor
//!
//! Builds the model-ready matrix from a feature table:
//! - numeric columns divided by their population standard deviation
//!   (no centering, so sparse-friendly; zero-variance columns pass through)
//! - categorical columns one-hot encoded against vocabularies learned at fit
//!   time; categories never seen during fit encode as all zeros

use ndarray::Array2;

use crate::error::{KddError, KddResult};
use crate::logic::dataset::Table;

/// Standard deviations below this are treated as zero
const STD_EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, PartialEq)]
struct NumericScale {
    column: String,
    std: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct CategoryVocabulary {
    column: String,
    /// Sorted, distinct
    categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct FittedColumns {
    numeric: Vec<NumericScale>,
    categorical: Vec<CategoryVocabulary>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnPreprocessor {
    fitted: Option<FittedColumns>,
}

impl ColumnPreprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Learn scales and vocabularies from `table`
    pub fn fit<S: AsRef<str>>(
        &mut self,
        table: &Table,
        numeric: &[S],
        categorical: &[S],
    ) -> KddResult<&mut Self> {
        if table.is_empty() {
            return Err(KddError::InvalidArgument(
                "cannot fit preprocessor on an empty table".to_string(),
            ));
        }

        let numeric = numeric
            .iter()
            .map(|name| {
                let values = numeric_values(table, name.as_ref())?;
                Ok(NumericScale {
                    column: name.as_ref().to_string(),
                    std: population_std(&values),
                })
            })
            .collect::<KddResult<Vec<_>>>()?;

        let categorical = categorical
            .iter()
            .map(|name| {
                let mut categories: Vec<String> = text_values(table, name.as_ref())?
                    .iter()
                    .flatten()
                    .cloned()
                    .collect();
                categories.sort();
                categories.dedup();
                Ok(CategoryVocabulary {
                    column: name.as_ref().to_string(),
                    categories,
                })
            })
            .collect::<KddResult<Vec<_>>>()?;

        log::debug!(
            "Preprocessor fit: {} numeric, {} categorical columns",
            numeric.len(),
            categorical.len()
        );

        self.fitted = Some(FittedColumns {
            numeric,
            categorical,
        });
        Ok(self)
    }

    /// Encode `table` into a dense row-major matrix
    pub fn transform(&self, table: &Table) -> KddResult<Array2<f64>> {
        let fitted = self.state()?;

        let width = fitted.numeric.len()
            + fitted
                .categorical
                .iter()
                .map(|v| v.categories.len())
                .sum::<usize>();
        let mut out = Array2::<f64>::zeros((table.n_rows(), width));

        for (j, scale) in fitted.numeric.iter().enumerate() {
            let values = numeric_values(table, &scale.column)?;
            for (i, v) in values.into_iter().enumerate() {
                out[[i, j]] = if scale.std > STD_EPSILON { v / scale.std } else { v };
            }
        }

        let mut offset = fitted.numeric.len();
        for vocab in &fitted.categorical {
            let values = text_values(table, &vocab.column)?;
            for (i, value) in values.iter().enumerate() {
                let slot = value
                    .as_deref()
                    .and_then(|v| vocab.categories.binary_search_by(|c| c.as_str().cmp(v)).ok());
                if let Some(k) = slot {
                    out[[i, offset + k]] = 1.0;
                }
            }
            offset += vocab.categories.len();
        }

        Ok(out)
    }

    pub fn fit_transform<S: AsRef<str>>(
        &mut self,
        table: &Table,
        numeric: &[S],
        categorical: &[S],
    ) -> KddResult<Array2<f64>> {
        self.fit(table, numeric, categorical)?.transform(table)
    }

    /// Output column names: numeric names, then `column=category` per one-hot slot
    pub fn feature_names(&self) -> KddResult<Vec<String>> {
        let fitted = self.state()?;

        let numeric = fitted.numeric.iter().map(|s| s.column.clone());
        let categorical = fitted.categorical.iter().flat_map(|v| {
            v.categories
                .iter()
                .map(move |c| format!("{}={}", v.column, c))
        });
        Ok(numeric.chain(categorical).collect())
    }

    fn state(&self) -> KddResult<&FittedColumns> {
        self.fitted
            .as_ref()
            .ok_or(KddError::UninitializedTransform("ColumnPreprocessor"))
    }
}

fn numeric_values(table: &Table, name: &str) -> KddResult<Vec<f64>> {
    table
        .require(name)?
        .data
        .to_f64()
        .ok_or_else(|| KddError::InvalidArgument(format!("'{}' is not a numeric column", name)))
}

fn text_values<'a>(table: &'a Table, name: &str) -> KddResult<&'a [Option<String>]> {
    table
        .require(name)?
        .data
        .as_text()
        .ok_or_else(|| KddError::InvalidArgument(format!("'{}' is not a text column", name)))
}

/// Population standard deviation over non-NaN values
fn population_std(values: &[f64]) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if finite.is_empty() {
        return 0.0;
    }

    let n = finite.len() as f64;
    let mean = finite.iter().sum::<f64>() / n;
    let variance = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
