//! Turns a click probability into a binary label with one configurable threshold.

use crate::config::DecisionConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickLabel {
    NoClick,
    Click,
}

impl ClickLabel {
    /// Strictly above the threshold is a click; equal is not.
    pub fn from_probability(probability: f32, config: &DecisionConfig) -> Self {
        if probability > config.threshold {
            ClickLabel::Click
        } else {
            ClickLabel::NoClick
        }
    }

    /// 0/1 flag for the JSON endpoint
    pub fn as_flag(self) -> u8 {
        match self {
            ClickLabel::NoClick => 0,
            ClickLabel::Click => 1,
        }
    }

    /// Yes/No text for the form
    pub fn as_text(self) -> &'static str {
        match self {
            ClickLabel::NoClick => "No",
            ClickLabel::Click => "Yes",
        }
    }
}

/// Decision for a single record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub request_id: String,
    pub probability: f32,
    pub label: ClickLabel,
}

pub struct DecisionEngine {
    config: DecisionConfig,
}

impl DecisionEngine {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    pub fn label(&self, probability: f32) -> ClickLabel {
        ClickLabel::from_probability(probability, &self.config)
    }

    pub fn decide(&self, request_id: String, probability: f32) -> Decision {
        let label = self.label(probability);
        Decision {
            request_id,
            probability,
            label,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.config.threshold
    }
}
