//! Multinomial Naive Bayes classifier
//!
//! Thin wrapper around smartcore's `MultinomialNB` working on [`FeatureMatrix`] input.

use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::naive_bayes::multinomial::{MultinomialNB, MultinomialNBParameters};

use crate::error::{DetectionError, Result};
use crate::vectorizer::FeatureMatrix;

type Inner = MultinomialNB<u32, u32, DenseMatrix<u32>, Vec<u32>>;

/// Trained spam/ham classifier
#[derive(Debug, Serialize, Deserialize)]
pub struct SpamModel {
    /// Vocabulary width the model was fitted on
    n_features: usize,
    inner: Inner,
}

impl SpamModel {
    /// Fit on document-term counts and encoded labels
    pub fn fit(x: &FeatureMatrix, y: &[u32], alpha: f64) -> Result<Self> {
        if x.n_rows() != y.len() {
            return Err(DetectionError::InvalidInput(format!(
                "{} feature rows but {} labels",
                x.n_rows(),
                y.len()
            )));
        }

        let parameters = MultinomialNBParameters::default().with_alpha(alpha);
        let inner = MultinomialNB::fit(&x.to_dense()?, &y.to_vec(), parameters)?;
        Ok(Self {
            n_features: x.n_features(),
            inner,
        })
    }

    /// Number of feature columns expected by [`SpamModel::predict`]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Predict one class id per row
    pub fn predict(&self, x: &FeatureMatrix) -> Result<Vec<u32>> {
        if x.n_features() != self.n_features {
            return Err(DetectionError::Model(format!(
                "{} feature columns but the model was fitted on {}",
                x.n_features(),
                self.n_features
            )));
        }
        Ok(self.inner.predict(&x.to_dense()?)?)
    }
}
