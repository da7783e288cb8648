//! Service configuration. One JSON file shared by training, scoring and serving.

use crate::error::{CtrError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Model and vocabulary artifacts
    pub model: ModelConfig,
    /// Training dataset and boosting parameters
    pub training: TrainingConfig,
    /// Probability threshold for the binary label
    pub decision: DecisionConfig,
    /// HTTP listener
    pub server: ServerConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Boosted-tree model written by `train`, read by `serve` and `score`
    pub model_path: PathBuf,
    /// Categorical vocabulary; defaults to `<model_path>.vocab.json`
    pub vocabulary_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub dataset_path: PathBuf,
    /// Binary label column in the dataset
    pub label_column: String,
    /// Number of boosting rounds
    pub iterations: usize,
    pub max_depth: u32,
    /// Learning rate
    pub shrinkage: f32,
    pub min_leaf_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Probabilities strictly above this are labeled as a click (0.0–1.0)
    pub threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            training: TrainingConfig::default(),
            decision: DecisionConfig::default(),
            server: ServerConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("xgb_model.bin"),
            vocabulary_path: None,
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("ad_10000records.csv"),
            label_column: "Clicked on Ad".to_string(),
            iterations: 100,
            max_depth: 6,
            shrinkage: 0.3,
            min_leaf_size: 1,
        }
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ModelConfig {
    /// Vocabulary path, explicit or derived from the model path.
    pub fn vocabulary_path(&self) -> PathBuf {
        match &self.vocabulary_path {
            Some(p) => p.clone(),
            None => {
                let mut name = self.model_path.as_os_str().to_os_string();
                name.push(".vocab.json");
                PathBuf::from(name)
            }
        }
    }
}

impl DecisionConfig {
    /// The threshold must be a probability. NaN would label every record 0.
    pub fn validate(&self) -> Result<()> {
        if (0.0..=1.0).contains(&self.threshold) {
            Ok(())
        } else {
            Err(CtrError::Config(format!(
                "decision.threshold must be within [0, 1], got {}",
                self.threshold
            )))
        }
    }
}

impl ServiceConfig {
    /// Check values that parse but cannot be used.
    pub fn validate(&self) -> Result<()> {
        self.decision.validate()
    }

    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(data) => match serde_json::from_str::<ServiceConfig>(&data) {
                    Ok(c) => return c,
                    Err(e) => eprintln!("ignoring config {}: {}", path.display(), e),
                },
                Err(e) => eprintln!("ignoring config {}: {}", path.display(), e),
            }
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_path_derives_from_model_path() {
        let c = ModelConfig::default();
        assert_eq!(c.vocabulary_path(), PathBuf::from("xgb_model.bin.vocab.json"));

        let c = ModelConfig {
            model_path: PathBuf::from("m.bin"),
            vocabulary_path: Some(PathBuf::from("v.json")),
        };
        assert_eq!(c.vocabulary_path(), PathBuf::from("v.json"));
    }

    #[test]
    fn threshold_outside_unit_interval_is_rejected() {
        for threshold in [f32::NAN, 1.5, -0.1, f32::INFINITY] {
            let c = DecisionConfig { threshold };
            assert!(matches!(c.validate(), Err(CtrError::Config(_))), "{threshold} accepted");
        }
        for threshold in [0.0, 0.5, 0.7, 1.0] {
            assert!(DecisionConfig { threshold }.validate().is_ok(), "{threshold} rejected");
        }

        let c: ServiceConfig = serde_json::from_str(r#"{"decision":{"threshold":1.5}}"#).unwrap();
        assert!(c.validate().is_err());
        assert!(ServiceConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let c: ServiceConfig = serde_json::from_str(r#"{"decision":{"threshold":0.7}}"#).unwrap();
        assert_eq!(c.decision.threshold, 0.7);
        assert_eq!(c.server.port, 5000);
        assert_eq!(c.training.label_column, "Clicked on Ad");
    }
}
