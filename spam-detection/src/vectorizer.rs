//! Bag-of-words count vectorizer
//!
//! The vocabulary is learned once by [`CountVectorizer::fit`] and frozen; terms
//! that were not seen during fitting are ignored by [`CountVectorizer::transform`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use crate::error::{DetectionError, Result};

fn token_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("valid regex"))
}

/// Split a document into lowercase tokens of two or more word characters
pub fn tokenize(text: &str) -> Vec<String> {
    token_pattern()
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Sparse document-term counts
///
/// Each row holds `(term index, count)` pairs sorted by term index; absent
/// terms have a zero count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureMatrix {
    rows: Vec<Vec<(usize, u32)>>,
    n_features: usize,
}

impl FeatureMatrix {
    /// Number of documents
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of vocabulary columns
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Non-zero counts of one document
    pub fn row(&self, index: usize) -> &[(usize, u32)] {
        &self.rows[index]
    }

    /// Total count of a term in one document
    pub fn get(&self, row: usize, column: usize) -> u32 {
        self.rows[row]
            .binary_search_by_key(&column, |&(index, _)| index)
            .map(|pos| self.rows[row][pos].1)
            .unwrap_or(0)
    }

    /// Dense copy for the model
    pub fn to_dense(&self) -> Result<DenseMatrix<u32>> {
        if self.rows.is_empty() || self.n_features == 0 {
            return Err(DetectionError::InvalidInput(format!(
                "cannot build a {}x{} feature matrix",
                self.rows.len(),
                self.n_features
            )));
        }

        let values: Vec<Vec<u32>> = self
            .rows
            .iter()
            .map(|row| {
                let mut dense = vec![0u32; self.n_features];
                for &(index, count) in row {
                    dense[index] = count;
                }
                dense
            })
            .collect();

        Ok(DenseMatrix::from_2d_vec(&values)?)
    }
}

/// Bag-of-words vectorizer with an optional vocabulary cap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountVectorizer {
    max_features: Option<usize>,
    vocabulary: BTreeMap<String, usize>,
}

impl CountVectorizer {
    /// Create an unfitted vectorizer
    pub fn new(max_features: Option<usize>) -> Self {
        Self {
            max_features,
            vocabulary: BTreeMap::new(),
        }
    }

    /// Learn the vocabulary from a corpus
    ///
    /// With `max_features` set, only the most frequent terms across the
    /// corpus are kept (ties broken alphabetically). Terms are indexed in
    /// alphabetical order.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        let mut frequencies: HashMap<String, u64> = HashMap::new();
        for document in documents {
            for token in tokenize(document.as_ref()) {
                *frequencies.entry(token).or_insert(0) += 1;
            }
        }

        if frequencies.is_empty() {
            return Err(DetectionError::EmptyVocabulary);
        }

        let mut terms: Vec<(String, u64)> = frequencies.into_iter().collect();
        if let Some(limit) = self.max_features {
            if limit < terms.len() {
                terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                terms.truncate(limit);
            }
        }

        let sorted: BTreeMap<String, usize> = terms.into_iter().map(|(term, _)| (term, 0)).collect();
        self.vocabulary = sorted
            .into_keys()
            .enumerate()
            .map(|(index, term)| (term, index))
            .collect();

        Ok(())
    }

    /// Count vocabulary terms in each document
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<FeatureMatrix> {
        if !self.is_fitted() {
            return Err(DetectionError::NotFitted);
        }

        let rows = documents
            .iter()
            .map(|document| self.count_terms(document.as_ref()))
            .collect();

        Ok(FeatureMatrix {
            rows,
            n_features: self.vocabulary.len(),
        })
    }

    /// Fit on a corpus, then transform it
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<FeatureMatrix> {
        self.fit(documents)?;
        self.transform(documents)
    }

    /// Transform a single document into a one-row matrix
    pub fn transform_one(&self, document: &str) -> Result<FeatureMatrix> {
        self.transform(&[document])
    }

    fn count_terms(&self, document: &str) -> Vec<(usize, u32)> {
        let mut counts: HashMap<usize, u32> = HashMap::new();
        for token in tokenize(document) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }

        let mut row: Vec<(usize, u32)> = counts.into_iter().collect();
        row.sort_unstable_by_key(|&(index, _)| index);
        row
    }

    /// Whether `fit` has produced a vocabulary
    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Number of vocabulary terms
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// Term → column index
    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    /// Configured vocabulary cap
    pub fn max_features(&self) -> Option<usize> {
        self.max_features
    }

    /// Check that a deserialized vocabulary maps onto columns `0..n` exactly once
    pub fn validate(&self) -> Result<()> {
        let n = self.vocabulary.len();
        let mut seen = vec![false; n];
        for (term, &index) in &self.vocabulary {
            if index >= n || seen[index] {
                return Err(DetectionError::InvalidArtifact(format!(
                    "vectorizer vocabulary has a bad index {} for term {:?}",
                    index, term
                )));
            }
            seen[index] = true;
        }
        Ok(())
    }
}
