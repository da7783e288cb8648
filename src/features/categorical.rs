//! Categorical vocabulary: category string → integer code, one table per field.
//! Built once from the training dataset and persisted next to the model so
//! serving uses exactly the codes the model was fitted on.

use super::RawRecord;
use crate::error::{CtrError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Code emitted for a category that is not in the table.
pub const OUT_OF_VOCABULARY: i64 = -1;

/// Bumped whenever the file layout or the code assignment rule changes.
pub const VOCABULARY_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoricalField {
    #[serde(rename = "Ad Topic Line")]
    AdTopicLine,
    City,
    Gender,
    Country,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 4] = [
        CategoricalField::AdTopicLine,
        CategoricalField::City,
        CategoricalField::Gender,
        CategoricalField::Country,
    ];

    /// Column name in records and in the feature schema
    pub fn name(self) -> &'static str {
        match self {
            CategoricalField::AdTopicLine => "Ad Topic Line",
            CategoricalField::City => "City",
            CategoricalField::Gender => "Gender",
            CategoricalField::Country => "Country",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Text form used as the vocabulary key. Null has no key.
pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub version: u32,
    /// SHA-256 of the model file trained alongside this vocabulary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_sha256: Option<String>,
    tables: BTreeMap<CategoricalField, BTreeMap<String, i64>>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            version: VOCABULARY_VERSION,
            model_sha256: None,
            tables: CategoricalField::ALL
                .into_iter()
                .map(|f| (f, BTreeMap::new()))
                .collect(),
        }
    }
}

impl Vocabulary {
    /// Enumerate the distinct values of each categorical field. Codes are
    /// positions in the sorted distinct set, so they depend only on which
    /// values occur, not on row order.
    pub fn build(records: &[RawRecord]) -> Self {
        let mut vocab = Self::default();
        for field in CategoricalField::ALL {
            let distinct: BTreeSet<String> = records
                .iter()
                .filter_map(|r| r.get(field.name()).and_then(value_text))
                .collect();
            let table = distinct
                .into_iter()
                .enumerate()
                .map(|(code, value)| (value, code as i64))
                .collect();
            vocab.tables.insert(field, table);
        }
        vocab
    }

    pub fn from_tables<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = (CategoricalField, Vec<S>)>,
        S: Into<String>,
    {
        let mut vocab = Self::default();
        for (field, values) in tables {
            let table = values
                .into_iter()
                .enumerate()
                .map(|(code, v)| (v.into(), code as i64))
                .collect();
            vocab.tables.insert(field, table);
        }
        vocab
    }

    pub fn lookup(&self, field: CategoricalField, value: &str) -> Option<i64> {
        self.tables.get(&field).and_then(|t| t.get(value)).copied()
    }

    /// Code for `value`, or [`OUT_OF_VOCABULARY`] when unseen. Never fails.
    pub fn code(&self, field: CategoricalField, value: &str) -> i64 {
        self.lookup(field, value).unwrap_or(OUT_OF_VOCABULARY)
    }

    /// Number of known categories for `field`
    pub fn len(&self, field: CategoricalField) -> usize {
        self.tables.get(&field).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(BTreeMap::is_empty)
    }

    pub fn with_model_digest(mut self, digest: impl Into<String>) -> Self {
        self.model_sha256 = Some(digest.into());
        self
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            CtrError::Vocabulary(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut vocab: Vocabulary = serde_json::from_str(&data)?;
        if vocab.version != VOCABULARY_VERSION {
            return Err(CtrError::Vocabulary(format!(
                "{} has version {}, expected {}",
                path.display(),
                vocab.version,
                VOCABULARY_VERSION
            )));
        }
        for field in CategoricalField::ALL {
            vocab.tables.entry(field).or_default();
        }
        Ok(vocab)
    }
}
