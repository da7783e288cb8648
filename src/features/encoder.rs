//! Record encoder: raw record → ordered 12-value feature vector.
//! Used unchanged by training, batch scoring and both serving front ends.

use super::categorical::{value_text, CategoricalField, Vocabulary, OUT_OF_VOCABULARY};
use super::timestamp::{parse_timestamp, DateParts};
use super::{FeatureVector, RawRecord, FEATURE_COUNT, SCHEMA, TIMESTAMP_FIELD};
use crate::error::{CtrError, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fields the encoder had to fill in for one record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodeReport {
    /// Schema fields absent from the record, filled with 0
    pub filled: Vec<&'static str>,
    /// Categorical values missing from the vocabulary, coded as -1
    pub out_of_vocabulary: Vec<(&'static str, String)>,
}

impl EncodeReport {
    pub fn is_clean(&self) -> bool {
        self.filled.is_empty() && self.out_of_vocabulary.is_empty()
    }
}

pub struct FeatureEncoder {
    vocabulary: Arc<Vocabulary>,
}

impl FeatureEncoder {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Encode one record, logging any defaults or sentinels it needed.
    pub fn encode(&self, record: &RawRecord) -> Result<FeatureVector> {
        let (vector, report) = self.encode_with_report(record)?;
        if !report.filled.is_empty() {
            warn!(fields = ?report.filled, "missing fields filled with 0");
        }
        for (field, value) in &report.out_of_vocabulary {
            warn!(field, value = %value, code = OUT_OF_VOCABULARY, "unseen category");
        }
        Ok(vector)
    }

    /// Encode many records; defaults and sentinels are logged once as totals.
    pub fn encode_all(&self, records: &[RawRecord]) -> Result<Vec<FeatureVector>> {
        let mut filled: BTreeMap<&'static str, usize> = BTreeMap::new();
        let mut unseen: BTreeMap<&'static str, usize> = BTreeMap::new();
        let mut out = Vec::with_capacity(records.len());
        for record in records {
            let (vector, report) = self.encode_with_report(record)?;
            for f in report.filled {
                *filled.entry(f).or_default() += 1;
            }
            for (f, _) in report.out_of_vocabulary {
                *unseen.entry(f).or_default() += 1;
            }
            out.push(vector);
        }
        if !filled.is_empty() {
            warn!(rows = records.len(), filled = ?filled, "missing fields filled with 0");
        }
        if !unseen.is_empty() {
            warn!(rows = records.len(), unseen = ?unseen, "unseen categories coded as -1");
        }
        Ok(out)
    }

    pub fn encode_with_report(&self, record: &RawRecord) -> Result<(FeatureVector, EncodeReport)> {
        let derived = match record.get(TIMESTAMP_FIELD) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(parse_timestamp(s)?),
            Some(other) => {
                return Err(CtrError::Timestamp {
                    value: other.to_string(),
                })
            }
        };

        let mut report = EncodeReport::default();
        let mut values = [0f32; FEATURE_COUNT];
        for (slot, name) in values.iter_mut().zip(SCHEMA) {
            if let Some(v) = derived.and_then(|p| date_part(&p, name)) {
                *slot = v;
                continue;
            }
            *slot = match record.get(name) {
                None | Some(Value::Null) => {
                    report.filled.push(name);
                    0.0
                }
                Some(v) => match CategoricalField::from_name(name) {
                    Some(field) => self.categorical(field, v, &mut report)?,
                    None => numeric(name, v)?,
                },
            };
        }
        debug!(?values, "encoded record");
        Ok((FeatureVector { values }, report))
    }

    fn categorical(&self, field: CategoricalField, value: &Value, report: &mut EncodeReport) -> Result<f32> {
        match value {
            // Already-assigned code
            Value::Number(n) => n.as_f64().map(|c| c as f32).ok_or_else(|| CtrError::NonNumeric {
                field: field.name().to_string(),
                value: n.to_string(),
            }),
            Value::String(_) | Value::Bool(_) => {
                let text = value_text(value).unwrap_or_default();
                let code = self.vocabulary.code(field, &text);
                if code == OUT_OF_VOCABULARY {
                    report.out_of_vocabulary.push((field.name(), text));
                }
                Ok(code as f32)
            }
            other => Err(CtrError::NonNumeric {
                field: field.name().to_string(),
                value: other.to_string(),
            }),
        }
    }
}

fn date_part(parts: &DateParts, name: &str) -> Option<f32> {
    match name {
        "Year" => Some(parts.year as f32),
        "Month" => Some(parts.month as f32),
        "Day" => Some(parts.day as f32),
        "Hour" => Some(parts.hour as f32),
        _ => None,
    }
}

fn numeric(name: &str, value: &Value) -> Result<f32> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.map(|v| v as f32).ok_or_else(|| CtrError::NonNumeric {
        field: name.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: Value) -> RawRecord {
        v.as_object().cloned().unwrap()
    }

    fn encoder() -> FeatureEncoder {
        FeatureEncoder::new(Arc::new(Vocabulary::from_tables([
            (CategoricalField::AdTopicLine, vec!["Cloned 5thgeneration orchestration"]),
            (CategoricalField::City, vec!["Wrightburgh", "West Jodi"]),
            (CategoricalField::Gender, vec!["Female", "Male"]),
            (CategoricalField::Country, vec!["Tunisia", "Nauru"]),
        ])))
    }

    #[test]
    fn full_record_encodes_in_schema_order() {
        let r = record(json!({
            "Hour": 99,
            "Country": "Nauru",
            "Daily Time Spent on Site": 68.95,
            "Age": 35,
            "Area Income": 61833.9,
            "Daily Internet Usage": 256.09,
            "Ad Topic Line": "Cloned 5thgeneration orchestration",
            "City": "West Jodi",
            "Gender": "Male",
            "Timestamp": "2016-03-27 00:53:11",
        }));
        let (fv, report) = encoder().encode_with_report(&r).unwrap();
        assert!(report.is_clean());
        assert_eq!(fv.as_slice().len(), FEATURE_COUNT);
        assert_eq!(
            fv.values,
            [68.95, 35.0, 61833.9, 256.09, 0.0, 1.0, 1.0, 1.0, 2016.0, 3.0, 27.0, 0.0]
        );
        let names: Vec<_> = fv.named().map(|(n, _)| n).collect();
        assert_eq!(names, SCHEMA.to_vec());
    }

    #[test]
    fn missing_timestamp_defaults_date_parts_to_zero() {
        let r = record(json!({"Age": 30}));
        let (fv, report) = encoder().encode_with_report(&r).unwrap();
        for name in ["Year", "Month", "Day", "Hour"] {
            assert_eq!(fv.get(name), Some(0.0));
            assert!(report.filled.contains(&name));
        }
        assert_eq!(fv.get("Age"), Some(30.0));
        assert_eq!(report.filled.len(), FEATURE_COUNT - 1);
    }

    #[test]
    fn explicit_date_parts_used_without_timestamp() {
        let r = record(json!({"Year": 2016, "Month": 2, "Day": 3, "Hour": 4}));
        let fv = encoder().encode(&r).unwrap();
        assert_eq!(&fv.values[8..], &[2016.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn timestamp_derives_date_parts() {
        let r = record(json!({"Timestamp": "2016-07-21 10:54:35"}));
        let fv = encoder().encode(&r).unwrap();
        assert_eq!(fv.get("Year"), Some(2016.0));
        assert_eq!(fv.get("Month"), Some(7.0));
        assert_eq!(fv.get("Day"), Some(21.0));
        assert_eq!(fv.get("Hour"), Some(10.0));
    }

    #[test]
    fn unseen_categories_yield_sentinel() {
        let r = record(json!({"City": "Atlantis", "Country": "Nauru", "Gender": "Other"}));
        let (fv, report) = encoder().encode_with_report(&r).unwrap();
        assert_eq!(fv.get("City"), Some(-1.0));
        assert_eq!(fv.get("Gender"), Some(-1.0));
        assert_eq!(fv.get("Country"), Some(1.0));
        assert_eq!(report.out_of_vocabulary.len(), 2);
    }

    #[test]
    fn numeric_categories_pass_through_as_codes() {
        let r = record(json!({"Ad Topic Line": 484, "City": 495, "Gender": 0, "Country": 149}));
        let fv = encoder().encode(&r).unwrap();
        assert_eq!(&fv.values[4..8], &[484.0, 495.0, 0.0, 149.0]);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let r = record(json!({"Age": " 41 ", "Area Income": "1000.5"}));
        let fv = encoder().encode(&r).unwrap();
        assert_eq!(fv.get("Age"), Some(41.0));
        assert_eq!(fv.get("Area Income"), Some(1000.5));
    }

    #[test]
    fn malformed_values_are_errors() {
        let enc = encoder();
        let bad_ts = record(json!({"Timestamp": "yesterday"}));
        assert!(matches!(enc.encode(&bad_ts), Err(CtrError::Timestamp { .. })));
        let bad_num = record(json!({"Age": "thirty"}));
        assert!(matches!(enc.encode(&bad_num), Err(CtrError::NonNumeric { .. })));
        let bad_cat = record(json!({"City": ["a"]}));
        assert!(matches!(enc.encode(&bad_cat), Err(CtrError::NonNumeric { .. })));
    }

    #[test]
    fn null_fields_count_as_missing() {
        let r = record(json!({"Age": null, "Timestamp": null}));
        let (fv, report) = encoder().encode_with_report(&r).unwrap();
        assert_eq!(fv.get("Age"), Some(0.0));
        assert!(report.filled.contains(&"Age"));
    }

    #[test]
    fn encode_all_preserves_row_order() {
        let rows = vec![record(json!({"Age": 1})), record(json!({"Age": 2}))];
        let out = encoder().encode_all(&rows).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].get("Age"), Some(1.0));
        assert_eq!(out[1].get("Age"), Some(2.0));
    }
}
