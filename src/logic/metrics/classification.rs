//! Classification metrics for binary and family targets

use std::collections::HashMap;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{KddError, KddResult};

fn check_lengths(a: usize, b: usize) -> KddResult<()> {
    if a != b {
        return Err(KddError::InvalidArgument(format!(
            "length mismatch: {} targets vs {} predictions",
            a, b
        )));
    }
    Ok(())
}

fn as_class(v: i64) -> KddResult<bool> {
    match v {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(KddError::InvalidArgument(format!(
            "binary value must be 0 or 1, got {}",
            other
        ))),
    }
}

// ============================================================================
// BINARY CONFUSION
// ============================================================================

/// Counts for the positive (attack = 1) class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryConfusion {
    pub true_positive: usize,
    pub false_positive: usize,
    pub true_negative: usize,
    pub false_negative: usize,
}

impl BinaryConfusion {
    pub fn from_predictions(y_true: &[i64], y_pred: &[i64]) -> KddResult<Self> {
        check_lengths(y_true.len(), y_pred.len())?;

        let mut cm = BinaryConfusion::default();
        for (&t, &p) in y_true.iter().zip(y_pred) {
            match (as_class(t)?, as_class(p)?) {
                (true, true) => cm.true_positive += 1,
                (false, true) => cm.false_positive += 1,
                (false, false) => cm.true_negative += 1,
                (true, false) => cm.false_negative += 1,
            }
        }
        Ok(cm)
    }

    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    /// 0 when there are no positives at all
    pub fn f1(&self) -> f64 {
        ratio(
            2 * self.true_positive,
            2 * self.true_positive + self.false_positive + self.false_negative,
        )
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positive + self.true_negative, self.total())
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

// ============================================================================
// ROC AUC
// ============================================================================

/// Area under the ROC curve via the rank statistic; tied scores share
/// their average rank. Both classes must be present.
pub fn roc_auc(y_true: &[i64], scores: &[f64]) -> KddResult<f64> {
    check_lengths(y_true.len(), scores.len())?;

    let positives = y_true
        .iter()
        .map(|&v| as_class(v))
        .collect::<KddResult<Vec<bool>>>()?;
    let n_pos = positives.iter().filter(|&&p| p).count();
    let n_neg = positives.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return Err(KddError::InvalidArgument(
            "ROC AUC needs both classes present".to_string(),
        ));
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let mut rank_sum_pos = 0.0;
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        // ranks are 1-based: i+1 ..= j+1
        let avg_rank = (i + j + 2) as f64 / 2.0;
        for &idx in &order[i..=j] {
            if positives[idx] {
                rank_sum_pos += avg_rank;
            }
        }
        i = j + 1;
    }

    let n_pos = n_pos as f64;
    let n_neg = n_neg as f64;
    Ok((rank_sum_pos - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg))
}

// ============================================================================
// MULTICLASS CONFUSION MATRIX
// ============================================================================

/// Rows are true labels, columns predicted labels, both in `labels` order.
/// Pairs involving a label outside `labels` are not counted.
pub fn confusion_matrix<S: AsRef<str>>(
    y_true: &[S],
    y_pred: &[S],
    labels: &[S],
) -> KddResult<Array2<usize>> {
    check_lengths(y_true.len(), y_pred.len())?;

    let index: HashMap<&str, usize> = labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_ref(), i))
        .collect();

    let mut cm = Array2::<usize>::zeros((labels.len(), labels.len()));
    for (t, p) in y_true.iter().zip(y_pred) {
        if let (Some(&i), Some(&j)) = (index.get(t.as_ref()), index.get(p.as_ref())) {
            cm[[i, j]] += 1;
        }
    }
    Ok(cm)
}
