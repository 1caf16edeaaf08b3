//! Training data preparation
//!
//! Load → validate labels → clean → stratified split → vectorize. The
//! vectorizer is fitted on the training split only and reused for the test
//! split and for inference.

use std::path::Path;
use tracing::{debug, info};

use crate::config::DetectionConfig;
use crate::dataset::{encode_labels, load_dataset, LabeledMessage};
use crate::error::Result;
use crate::split::{stratified_split, TrainTestSplit};
use crate::text::{clean_optional, clean_text};
use crate::vectorizer::{CountVectorizer, FeatureMatrix};

/// Matrices ready for model fitting
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub x_train: FeatureMatrix,
    pub x_test: FeatureMatrix,
    pub y_train: Vec<u32>,
    pub y_test: Vec<u32>,
    pub vectorizer: CountVectorizer,
}

/// Clean every message and extract encoded labels
pub fn prepare_features_and_target(records: &[LabeledMessage]) -> (Vec<String>, Vec<u32>) {
    records
        .iter()
        .map(|record| (clean_optional(record.message.as_deref()), record.label.class_id()))
        .unzip()
}

/// Stratified, seeded split of cleaned texts
pub fn split_data(
    texts: &[String],
    labels: &[u32],
    test_size: f64,
    random_state: u64,
) -> Result<TrainTestSplit<String>> {
    stratified_split(texts, labels, test_size, random_state)
}

/// Fit the vectorizer on the training texts and transform both splits
pub fn vectorize_train_test(
    x_train: &[String],
    x_test: &[String],
    mut vectorizer: CountVectorizer,
) -> Result<(CountVectorizer, FeatureMatrix, FeatureMatrix)> {
    let train = vectorizer.fit_transform(x_train)?;
    let test = vectorizer.transform(x_test)?;
    Ok((vectorizer, train, test))
}

/// Run the full preparation chain on the configured dataset
pub fn prepare_training_matrices(config: &DetectionConfig) -> Result<PreparedData> {
    prepare_training_matrices_from(&config.dataset_path(), config)
}

/// Run the full preparation chain on an explicit dataset file
pub fn prepare_training_matrices_from(
    data_path: &Path,
    config: &DetectionConfig,
) -> Result<PreparedData> {
    info!("Loading dataset from {}", data_path.display());
    let records = encode_labels(load_dataset(data_path)?)?;
    debug!("{} labeled messages", records.len());

    let (texts, labels) = prepare_features_and_target(&records);
    let split = split_data(&texts, &labels, config.test_size, config.random_state)?;

    let (vectorizer, x_train, x_test) = vectorize_train_test(
        &split.x_train,
        &split.x_test,
        CountVectorizer::new(config.max_features),
    )?;
    debug!("Vocabulary size: {}", vectorizer.n_features());

    Ok(PreparedData {
        x_train,
        x_test,
        y_train: split.y_train,
        y_test: split.y_test,
        vectorizer,
    })
}

/// Inference-side cleaning, identical to the training-side cleaning
pub fn preprocess_input_text(text: &str) -> String {
    clean_text(text)
}

/// Clean and vectorize one input text with a fitted vectorizer
pub fn vectorize_input_text(text: &str, vectorizer: &CountVectorizer) -> Result<FeatureMatrix> {
    vectorizer.transform_one(&preprocess_input_text(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Label;

    #[test]
    fn test_prepare_features_and_target() {
        let records = vec![
            LabeledMessage {
                label: Label::Spam,
                message: Some("WIN a FREE prize!!".to_string()),
            },
            LabeledMessage {
                label: Label::Ham,
                message: None,
            },
        ];
        let (texts, labels) = prepare_features_and_target(&records);
        assert_eq!(texts, vec!["win a free prize".to_string(), String::new()]);
        assert_eq!(labels, vec![1, 0]);
    }

    #[test]
    fn test_vectorizer_is_fitted_on_train_only() {
        let x_train = vec!["cash prize".to_string(), "lunch today".to_string()];
        let x_test = vec!["unseen holiday cash".to_string()];
        let (vectorizer, train, test) =
            vectorize_train_test(&x_train, &x_test, CountVectorizer::new(None)).unwrap();

        assert!(!vectorizer.vocabulary().contains_key("holiday"));
        assert_eq!(train.n_features(), 4);
        assert_eq!(test.n_features(), 4);
        assert_eq!(test.row(0), &[(vectorizer.vocabulary()["cash"], 1)]);
    }

    #[test]
    fn test_vectorize_input_text_cleans_first() {
        let mut vectorizer = CountVectorizer::new(None);
        vectorizer.fit(&["free cash"]).unwrap();
        let matrix = vectorize_input_text("FREE!!! Cash?", &vectorizer).unwrap();
        assert_eq!(matrix.row(0).len(), 2);
    }
}
