//! Smoke-check client: post one record to a running `/predict` endpoint.

use crate::error::{CtrError, Result};
use crate::features::RawRecord;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{info, warn};

/// Body returned by `/predict`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Prediction {
        #[serde(rename = "CTR")]
        ctr: u8,
    },
    Error {
        error: String,
    },
}

/// Reference record with pre-assigned categorical codes.
pub fn sample_record() -> RawRecord {
    let v = json!({
        "Daily Time Spent on Site": 49.21,
        "Age": 30,
        "Area Income": 54324.73,
        "Daily Internet Usage": 201.58,
        "Ad Topic Line": 484,
        "City": 495,
        "Gender": 0,
        "Country": 149,
        "Timestamp": "2016-07-21 10:54:35"
    });
    match v {
        serde_json::Value::Object(map) => map,
        _ => RawRecord::new(),
    }
}

pub struct PredictClient {
    client: reqwest::blocking::Client,
    url: String,
}

impl PredictClient {
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Post `record`; returns the raw body text and its parsed form.
    pub fn predict(&self, record: &RawRecord) -> Result<(String, PredictResponse)> {
        let res = self.client.post(&self.url).json(record).send()?;
        let status = res.status();
        let text = res.text()?;
        if !status.is_success() {
            warn!(url = %self.url, %status, "predict request failed");
            return Err(CtrError::Endpoint(format!("{} {}", status, text)));
        }
        let parsed: PredictResponse = serde_json::from_str(&text)?;
        info!(url = %self.url, response = %text, "predict response");
        Ok((text, parsed))
    }
}
