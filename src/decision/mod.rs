//! Probability thresholding.

mod engine;

pub use engine::{ClickLabel, Decision, DecisionEngine};
