//! Offline training driver: CSV → vocabulary → encoded rows → fitted model on disk.

use crate::config::ServiceConfig;
use crate::dataset::Dataset;
use crate::decision::ClickLabel;
use crate::error::Result;
use crate::features::{CategoricalField, FeatureEncoder, Vocabulary};
use crate::model::{file_digest, GbdtModel};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub rows: usize,
    pub model_path: PathBuf,
    pub vocabulary_path: PathBuf,
    pub model_sha256: String,
    /// In-process probabilities for every training row, in row order
    pub probabilities: Vec<f32>,
    /// Share of rows labeled correctly at the configured threshold
    pub accuracy: f32,
}

/// Load the configured dataset and train on it.
pub fn train(config: &ServiceConfig) -> Result<TrainingReport> {
    let dataset = Dataset::from_csv(&config.training.dataset_path, &config.training.label_column)?;
    train_on(&dataset, config)
}

pub fn train_on(dataset: &Dataset, config: &ServiceConfig) -> Result<TrainingReport> {
    config.validate()?;
    let labels = dataset.require_labels(&config.training.label_column)?;

    let vocabulary = Arc::new(Vocabulary::build(&dataset.records));
    for field in CategoricalField::ALL {
        info!(field = field.name(), categories = vocabulary.len(field), "vocabulary built");
    }
    let encoder = FeatureEncoder::new(Arc::clone(&vocabulary));
    let vectors = encoder.encode_all(&dataset.records)?;

    let model = GbdtModel::fit(&vectors, labels, &config.training)?;
    let probabilities = model.predict_batch(&vectors)?;
    let correct = probabilities
        .iter()
        .zip(labels)
        .filter(|(p, y)| ClickLabel::from_probability(**p, &config.decision).as_flag() == **y)
        .count();
    let accuracy = correct as f32 / labels.len() as f32;

    let model_path = config.model.model_path.clone();
    let vocabulary_path = config.model.vocabulary_path();
    if let Some(dir) = model_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    model.save(&model_path)?;
    let model_sha256 = file_digest(&model_path)?;
    Vocabulary::clone(&vocabulary)
        .with_model_digest(model_sha256.clone())
        .save(&vocabulary_path)?;

    info!(
        rows = dataset.len(),
        accuracy,
        model = %model_path.display(),
        vocabulary = %vocabulary_path.display(),
        "model trained and saved"
    );
    Ok(TrainingReport {
        rows: dataset.len(),
        model_path,
        vocabulary_path,
        model_sha256,
        probabilities,
        accuracy,
    })
}
