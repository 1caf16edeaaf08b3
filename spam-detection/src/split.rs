//! Stratified train/test split
//!
//! Every class contributes the same share of its members to the test set, so
//! the spam/ham ratio is preserved on both sides. The shuffle is driven by a
//! seeded ChaCha generator: the same seed always yields the same split.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

use crate::error::{DetectionError, Result};

/// Result of [`stratified_split`]
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit<T> {
    pub x_train: Vec<T>,
    pub x_test: Vec<T>,
    pub y_train: Vec<u32>,
    pub y_test: Vec<u32>,
}

/// Split samples into train and test sets, preserving class proportions
pub fn stratified_split<T: Clone>(
    samples: &[T],
    labels: &[u32],
    test_size: f64,
    seed: u64,
) -> Result<TrainTestSplit<T>> {
    if samples.len() != labels.len() {
        return Err(DetectionError::InvalidInput(format!(
            "{} samples but {} labels",
            samples.len(),
            labels.len()
        )));
    }

    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(DetectionError::InvalidInput(format!(
            "test_size must be strictly between 0 and 1, got {}",
            test_size
        )));
    }

    let mut by_class: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (index, &label) in labels.iter().enumerate() {
        by_class.entry(label).or_default().push(index);
    }

    if let Some((class, members)) = by_class.iter().find(|(_, members)| members.len() < 2) {
        return Err(DetectionError::InvalidInput(format!(
            "class {} has only {} member(s); at least 2 are needed to stratify",
            class,
            members.len()
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut train_indices = Vec::new();
    let mut test_indices = Vec::new();

    for members in by_class.values_mut() {
        members.shuffle(&mut rng);
        let n_test = test_count(members.len(), test_size);
        test_indices.extend_from_slice(&members[..n_test]);
        train_indices.extend_from_slice(&members[n_test..]);
    }

    train_indices.shuffle(&mut rng);
    test_indices.shuffle(&mut rng);

    let pick = |indices: &[usize]| -> (Vec<T>, Vec<u32>) {
        indices
            .iter()
            .map(|&i| (samples[i].clone(), labels[i]))
            .unzip()
    };

    let (x_train, y_train) = pick(&train_indices);
    let (x_test, y_test) = pick(&test_indices);

    Ok(TrainTestSplit {
        x_train,
        x_test,
        y_train,
        y_test,
    })
}

/// Members of a class sent to the test set, keeping at least one on each side
fn test_count(class_size: usize, test_size: f64) -> usize {
    let n = (class_size as f64 * test_size).round() as usize;
    n.clamp(1, class_size - 1)
}
