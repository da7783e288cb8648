//! Shared read-only serving state

use crate::predictor::Predictor;
use std::path::PathBuf;
use std::sync::Arc;

/// Built once at startup, never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
    pub model_path: PathBuf,
}

impl AppState {
    pub fn new(predictor: Predictor, model_path: PathBuf) -> Self {
        Self {
            predictor: Arc::new(predictor),
            model_path,
        }
    }
}
