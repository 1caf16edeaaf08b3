//! Held-out evaluation metrics
//!
//! Spam (class 1) is the positive class. A ratio whose denominator is zero
//! evaluates to 0 instead of failing.

use serde::{Deserialize, Serialize};

/// Positive class id
pub const POSITIVE_CLASS: u32 = 1;

/// Binary confusion counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    /// Tally predictions against ground truth (pairs beyond the shorter slice are ignored)
    pub fn from_predictions(y_true: &[u32], y_pred: &[u32]) -> Self {
        let mut matrix = Self::default();
        for (&actual, &predicted) in y_true.iter().zip(y_pred) {
            match (actual == POSITIVE_CLASS, predicted == POSITIVE_CLASS) {
                (true, true) => matrix.true_positives += 1,
                (false, true) => matrix.false_positives += 1,
                (false, false) => matrix.true_negatives += 1,
                (true, false) => matrix.false_negatives += 1,
            }
        }
        matrix
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }
}

/// Scores stored alongside the trained model
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl EvaluationMetrics {
    /// Compute accuracy, precision, recall and F1 for the spam class
    pub fn evaluate(y_true: &[u32], y_pred: &[u32]) -> Self {
        Self::from_confusion(&ConfusionMatrix::from_predictions(y_true, y_pred))
    }

    pub fn from_confusion(m: &ConfusionMatrix) -> Self {
        let accuracy = ratio(m.true_positives + m.true_negatives, m.total());
        let precision = ratio(m.true_positives, m.true_positives + m.false_positives);
        let recall = ratio(m.true_positives, m.true_positives + m.false_negatives);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        Self {
            accuracy,
            precision,
            recall,
            f1,
        }
    }
}

/// Precision of the spam class alone
pub fn precision_score(y_true: &[u32], y_pred: &[u32]) -> f64 {
    EvaluationMetrics::evaluate(y_true, y_pred).precision
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
