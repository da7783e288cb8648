//! Error type shared by the encoder, model wrapper, training driver and front ends.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CtrError {
    #[error("invalid Timestamp {value:?}: expected YYYY-MM-DD HH:MM:SS")]
    Timestamp { value: String },

    #[error("field {field:?} must be numeric, got {value}")]
    NonNumeric { field: String, value: String },

    #[error("expected a JSON object of record fields")]
    NotAnObject,

    #[error("feature {field:?} is not finite")]
    NonFinite { field: &'static str },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("model error: {0}")]
    Model(String),

    #[error("vocabulary error: {0}")]
    Vocabulary(String),

    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("endpoint returned {0}")]
    Endpoint(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, CtrError>;
