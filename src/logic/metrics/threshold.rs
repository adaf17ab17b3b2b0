//! Decision Threshold Search
//!
//! Picks the score cut-off that maximises F1 for the attack class.

use serde::{Deserialize, Serialize};

use super::classification::BinaryConfusion;
use crate::error::{KddError, KddResult};

/// Threshold sweep configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdSweep {
    /// First threshold tried
    pub start: f64,

    /// Last threshold tried
    pub end: f64,

    /// Number of evenly spaced thresholds (inclusive of both ends)
    pub steps: usize,
}

impl Default for ThresholdSweep {
    fn default() -> Self {
        Self {
            start: 0.1,
            end: 0.9,
            steps: 81,
        }
    }
}

/// Best threshold found by a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSearch {
    pub threshold: f64,
    pub f1: f64,
}

impl ThresholdSweep {
    /// Candidate thresholds, evenly spaced
    pub fn thresholds(&self) -> Vec<f64> {
        match self.steps {
            0 => Vec::new(),
            1 => vec![self.start],
            n => (0..n)
                .map(|i| self.start + (self.end - self.start) * i as f64 / (n - 1) as f64)
                .collect(),
        }
    }

    /// Sweep thresholds (`score >= t` predicts attack) and keep the first with
    /// the highest F1. Starts from `(0.5, -1.0)` so an empty sweep reports that.
    pub fn search(&self, y_true: &[i64], scores: &[f64]) -> KddResult<ThresholdSearch> {
        if y_true.len() != scores.len() {
            return Err(KddError::InvalidArgument(format!(
                "length mismatch: {} targets vs {} scores",
                y_true.len(),
                scores.len()
            )));
        }

        let mut best = ThresholdSearch {
            threshold: 0.5,
            f1: -1.0,
        };

        let mut y_pred = vec![0i64; scores.len()];
        for t in self.thresholds() {
            for (p, &s) in y_pred.iter_mut().zip(scores) {
                *p = i64::from(s >= t);
            }
            let f1 = BinaryConfusion::from_predictions(y_true, &y_pred)?.f1();
            if f1 > best.f1 {
                best = ThresholdSearch { threshold: t, f1 };
            }
        }

        Ok(best)
    }
}

/// F1-optimal threshold over the default sweep (0.1 to 0.9, 81 steps)
pub fn find_best_threshold(y_true: &[i64], scores: &[f64]) -> KddResult<ThresholdSearch> {
    ThresholdSweep::default().search(y_true, scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sweep() {
        let thresholds = ThresholdSweep::default().thresholds();
        assert_eq!(thresholds.len(), 81);
        assert!((thresholds[0] - 0.1).abs() < 1e-12);
        assert!((thresholds[40] - 0.5).abs() < 1e-12);
        assert!((thresholds[80] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_separable_scores() {
        let y = [0, 0, 0, 1, 1];
        let scores = [0.05, 0.2, 0.255, 0.6, 0.95];
        let best = find_best_threshold(&y, &scores).unwrap();

        assert_eq!(best.f1, 1.0);
        // first threshold above 0.255
        assert!((best.threshold - 0.26).abs() < 1e-9);
    }

    #[test]
    fn test_no_positives_keeps_first_threshold() {
        let best = find_best_threshold(&[0, 0], &[0.2, 0.7]).unwrap();
        assert_eq!(best.f1, 0.0);
        assert!((best.threshold - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_empty_sweep() {
        let sweep = ThresholdSweep {
            steps: 0,
            ..Default::default()
        };
        let best = sweep.search(&[1], &[0.9]).unwrap();
        assert_eq!(best, ThresholdSearch { threshold: 0.5, f1: -1.0 });
    }

    #[test]
    fn test_length_mismatch() {
        assert!(find_best_threshold(&[0, 1], &[0.5]).is_err());
    }
}
