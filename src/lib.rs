//! Ad click-through-rate prediction: offline boosted-tree training plus
//! JSON and HTML form serving over one shared feature pipeline.
//!
//! Modular structure:
//! - [`features`] - Record encoding, timestamp decomposition, categorical vocabulary
//! - [`model`] - Boosted-tree click model (fit, predict, save, load)
//! - [`decision`] - Probability threshold and label rendering
//! - [`predictor`] - Encode → predict → decide, shared by every entry point
//! - [`dataset`] - CSV loading
//! - [`training`] - Offline training driver
//! - [`server`] - `/predict` endpoint and form UI
//! - [`client`] - Smoke-check client for a running endpoint
//! - [`logging`] - Tracing subscriber setup

pub mod client;
pub mod config;
pub mod dataset;
pub mod decision;
pub mod error;
pub mod features;
pub mod logging;
pub mod model;
pub mod predictor;
pub mod server;
pub mod training;

pub use config::ServiceConfig;
pub use decision::{ClickLabel, Decision, DecisionEngine};
pub use error::{CtrError, Result};
pub use features::{FeatureEncoder, FeatureVector, RawRecord, Vocabulary};
pub use logging::StructuredLogger;
pub use model::GbdtModel;
pub use predictor::Predictor;
