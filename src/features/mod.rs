//! Feature pipeline: raw record → timestamp derivation → categorical codes → ordered vector.

mod categorical;
mod encoder;
mod timestamp;

pub use categorical::{CategoricalField, Vocabulary, OUT_OF_VOCABULARY, VOCABULARY_VERSION};
pub use encoder::{EncodeReport, FeatureEncoder};
pub use timestamp::{parse_timestamp, synthesize_timestamp, DateParts};

use serde::{Deserialize, Serialize};

/// One unvalidated input record: field name → scalar JSON value.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Number of model inputs.
pub const FEATURE_COUNT: usize = 12;

/// Model input order. The booster only sees positions, so this order must
/// match between training and serving.
pub const SCHEMA: [&str; FEATURE_COUNT] = [
    "Daily Time Spent on Site",
    "Age",
    "Area Income",
    "Daily Internet Usage",
    "Ad Topic Line",
    "City",
    "Gender",
    "Country",
    "Year",
    "Month",
    "Day",
    "Hour",
];

/// Raw field decomposed into `Year, Month, Day, Hour`.
pub const TIMESTAMP_FIELD: &str = "Timestamp";

/// Fixed-order feature vector for model input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Value by schema name
    pub fn get(&self, name: &str) -> Option<f32> {
        SCHEMA
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
    }

    /// (name, value) pairs in schema order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        SCHEMA.iter().copied().zip(self.values.iter().copied())
    }
}
