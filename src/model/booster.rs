//! Boosted-tree click model over the `gbdt` crate. Input: 12 f32 features, output: P(click).
//! Tree construction and the on-disk format belong to the library.

use crate::config::TrainingConfig;
use crate::error::{CtrError, Result};
use crate::features::{FeatureVector, FEATURE_COUNT};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use std::path::Path;
use tracing::{debug, info};

const LOSS: &str = "LogLikelyhood";

pub struct GbdtModel {
    booster: GBDT,
}

impl GbdtModel {
    /// Fit on encoded rows. `labels` are 0/1 click flags.
    pub fn fit(vectors: &[FeatureVector], labels: &[u8], params: &TrainingConfig) -> Result<Self> {
        if vectors.is_empty() {
            return Err(CtrError::Dataset("no training rows".into()));
        }
        if vectors.len() != labels.len() {
            return Err(CtrError::Dataset(format!(
                "{} rows but {} labels",
                vectors.len(),
                labels.len()
            )));
        }
        // A one-class label set drives the log-likelihood prior to +/-inf,
        // which the saved model cannot represent.
        if labels.iter().all(|&y| y == labels[0]) {
            return Err(CtrError::Dataset("labels contain a single class".into()));
        }
        for fv in vectors {
            check_finite(fv)?;
        }

        let mut config = Config::new();
        config.set_feature_size(FEATURE_COUNT);
        config.set_max_depth(params.max_depth);
        config.set_iterations(params.iterations);
        config.set_shrinkage(params.shrinkage);
        config.set_min_leaf_size(params.min_leaf_size);
        config.set_loss(LOSS);
        config.set_debug(false);

        // Log-likelihood loss expects labels in {-1, +1}
        let mut train: DataVec = vectors
            .iter()
            .zip(labels)
            .map(|(fv, &y)| {
                let label = if y == 1 { 1.0 } else { -1.0 };
                Data::new_training_data(fv.values.to_vec(), 1.0, label, None)
            })
            .collect();

        info!(
            rows = train.len(),
            iterations = params.iterations,
            max_depth = params.max_depth,
            shrinkage = params.shrinkage,
            "fitting boosted trees"
        );
        let mut booster = GBDT::new(&config);
        booster.fit(&mut train);
        Ok(Self { booster })
    }

    /// Click probability in [0, 1] for one vector
    pub fn predict(&self, features: &FeatureVector) -> Result<f32> {
        self.predict_batch(std::slice::from_ref(features))?
            .first()
            .copied()
            .ok_or_else(|| CtrError::Model("empty prediction".into()))
    }

    pub fn predict_batch(&self, vectors: &[FeatureVector]) -> Result<Vec<f32>> {
        for fv in vectors {
            check_finite(fv)?;
        }
        let test: DataVec = vectors
            .iter()
            .map(|fv| Data::new_test_data(fv.values.to_vec(), None))
            .collect();
        let out = self.booster.predict(&test);
        if out.len() != vectors.len() {
            return Err(CtrError::Model(format!(
                "{} predictions for {} rows",
                out.len(),
                vectors.len()
            )));
        }
        Ok(out.into_iter().map(|p| p.clamp(0.0, 1.0)).collect())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let name = path_str(path)?;
        self.booster
            .save_model(name)
            .map_err(|e| CtrError::Model(format!("cannot save {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "model saved");
        Ok(())
    }

    /// Load a model written by [`GbdtModel::save`]. Missing or corrupt files are errors.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CtrError::Model(format!("model file {} not found", path.display())));
        }
        let name = path_str(path)?;
        let booster = GBDT::load_model(name)
            .map_err(|e| CtrError::Model(format!("cannot load {}: {}", path.display(), e)))?;
        Ok(Self { booster })
    }
}

fn check_finite(fv: &FeatureVector) -> Result<()> {
    match fv.named().find(|(_, v)| !v.is_finite()) {
        Some((field, _)) => Err(CtrError::NonFinite { field }),
        None => Ok(()),
    }
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| CtrError::Model(format!("non UTF-8 path {}", path.display())))
}
