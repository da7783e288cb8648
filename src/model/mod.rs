//! Click model wrapper and artifact fingerprinting.

mod booster;

pub use booster::GbdtModel;

use crate::error::Result;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Hex SHA-256 of a model file, recorded in the vocabulary to pair the two artifacts.
pub fn file_digest(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}
