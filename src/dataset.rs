//! CSV dataset loading: one raw record per row plus the optional click label.

use crate::error::{CtrError, Result};
use crate::features::{CategoricalField, RawRecord, TIMESTAMP_FIELD};
use serde_json::{Number, Value};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<RawRecord>,
    /// Present when the label column exists, one per record
    pub labels: Option<Vec<u8>>,
}

impl Dataset {
    /// Load a CSV with a header row. Categorical and `Timestamp` cells stay
    /// strings; other cells become numbers when they parse. Empty cells are
    /// left out of the record.
    pub fn from_csv(path: &Path, label_column: &str) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            CtrError::Dataset(format!("cannot open {}: {}", path.display(), e))
        })?;
        let headers = reader.headers()?.clone();
        let label_idx = headers.iter().position(|h| h == label_column);

        let mut records = Vec::new();
        let mut labels = label_idx.map(|_| Vec::new());
        for (row, result) in reader.records().enumerate() {
            let line = result?;
            let mut record = RawRecord::new();
            for (i, (name, cell)) in headers.iter().zip(line.iter()).enumerate() {
                if Some(i) == label_idx {
                    let label = parse_label(cell).ok_or_else(|| {
                        CtrError::Dataset(format!(
                            "row {}: {} must be 0 or 1, got {:?}",
                            row + 1,
                            label_column,
                            cell
                        ))
                    })?;
                    if let Some(l) = labels.as_mut() {
                        l.push(label);
                    }
                    continue;
                }
                if cell.trim().is_empty() {
                    continue;
                }
                record.insert(name.to_string(), cell_value(name, cell));
            }
            records.push(record);
        }

        if records.is_empty() {
            return Err(CtrError::Dataset(format!("{} has no rows", path.display())));
        }
        info!(
            path = %path.display(),
            rows = records.len(),
            columns = headers.len(),
            labeled = label_idx.is_some(),
            "dataset loaded"
        );
        Ok(Self { records, labels })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Labels, or an error naming the missing column
    pub fn require_labels(&self, label_column: &str) -> Result<&[u8]> {
        self.labels
            .as_deref()
            .ok_or_else(|| CtrError::Dataset(format!("label column {:?} not found", label_column)))
    }
}

fn parse_label(cell: &str) -> Option<u8> {
    match cell.trim() {
        "1" | "1.0" | "true" | "True" => Some(1),
        "0" | "0.0" | "false" | "False" => Some(0),
        _ => None,
    }
}

fn cell_value(name: &str, cell: &str) -> Value {
    if name == TIMESTAMP_FIELD || CategoricalField::from_name(name).is_some() {
        return Value::String(cell.to_string());
    }
    cell.trim()
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(cell.to_string()))
}
