//! Per-record prediction: encode → model → threshold. Shared by every entry point.

use crate::config::{DecisionConfig, ModelConfig};
use crate::dataset::Dataset;
use crate::decision::{ClickLabel, Decision, DecisionEngine};
use crate::error::{CtrError, Result};
use crate::features::{FeatureEncoder, RawRecord, Vocabulary};
use crate::model::{file_digest, GbdtModel};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// One scored CSV row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRow {
    pub row: usize,
    pub probability: f32,
    pub label: ClickLabel,
}

pub struct Predictor {
    encoder: FeatureEncoder,
    model: GbdtModel,
    decision: DecisionEngine,
}

impl Predictor {
    pub fn new(encoder: FeatureEncoder, model: GbdtModel, decision: DecisionEngine) -> Self {
        Self {
            encoder,
            model,
            decision,
        }
    }

    /// Load model and vocabulary written by the training driver. Either one
    /// missing or unreadable is an error; callers treat it as fatal.
    pub fn load(model_config: &ModelConfig, decision: DecisionConfig) -> Result<Self> {
        decision.validate()?;
        let model_path = &model_config.model_path;
        let vocab_path = model_config.vocabulary_path();
        let model = GbdtModel::load(model_path)?;
        let vocabulary = Vocabulary::load(&vocab_path)?;

        if let Some(expected) = vocabulary.model_sha256.as_deref() {
            let actual = file_digest(model_path)?;
            if actual != expected {
                warn!(
                    model = %model_path.display(),
                    vocabulary = %vocab_path.display(),
                    "vocabulary was produced for a different model file"
                );
            }
        }
        info!(
            model = %model_path.display(),
            vocabulary = %vocab_path.display(),
            threshold = decision.threshold,
            "model loaded"
        );
        Ok(Self::new(
            FeatureEncoder::new(Arc::new(vocabulary)),
            model,
            DecisionEngine::new(decision),
        ))
    }

    pub fn probability(&self, record: &RawRecord) -> Result<f32> {
        let features = self.encoder.encode(record)?;
        self.model.predict(&features)
    }

    pub fn predict(&self, record: &RawRecord) -> Result<Decision> {
        let request_id = Uuid::new_v4().to_string();
        let probability = self.probability(record).map_err(|e| {
            warn!(request_id = %request_id, error = %e, "prediction failed");
            e
        })?;
        let decision = self.decision.decide(request_id, probability);
        info!(
            request_id = %decision.request_id,
            probability = decision.probability,
            label = ?decision.label,
            "prediction"
        );
        Ok(decision)
    }

    /// Score every record of a dataset in one batch. Labels, if any, are ignored.
    pub fn score(&self, dataset: &Dataset) -> Result<Vec<ScoredRow>> {
        let vectors = self.encoder.encode_all(&dataset.records)?;
        let probabilities = self.model.predict_batch(&vectors)?;
        let rows: Vec<ScoredRow> = probabilities
            .into_iter()
            .enumerate()
            .map(|(row, probability)| ScoredRow {
                row,
                probability,
                label: self.decision.label(probability),
            })
            .collect();
        info!(rows = rows.len(), threshold = self.threshold(), "scoring complete");
        Ok(rows)
    }

    /// Predict from an arbitrary JSON value; only objects are records.
    pub fn predict_value(&self, body: &Value) -> Result<Decision> {
        let record = body.as_object().ok_or(CtrError::NotAnObject)?;
        self.predict(record)
    }

    pub fn threshold(&self) -> f32 {
        self.decision.threshold()
    }
}
