//! JSON persistence of solved rotations.
//!
//! A rotation is stored as `<dir>/<category>/rotation.json`:
//!
//! ```json
//! {
//!   "category": "kitchen",
//!   "periods": [
//!     { "K1": ["A", "C"], "K2": ["D", "M"], "K3": ["H", "P"] }
//!   ]
//! }
//! ```
//!
//! Pairs are written in canonical order and re-validated on load.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rota_core::Schedule;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of a stored rotation inside its category directory.
pub const FILE_NAME: &str = "rotation.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("stored rotation is for category '{found}', expected '{expected}'")]
    CategoryMismatch { expected: String, found: String },
}

/// A schedule together with the category it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRotation {
    pub category: String,
    pub periods: Schedule,
}

impl StoredRotation {
    pub fn new(category: impl Into<String>, periods: Schedule) -> Self {
        Self {
            category: category.into(),
            periods,
        }
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Where the rotation of `category` lives under `dir`.
pub fn path_for(dir: impl AsRef<Path>, category: &str) -> PathBuf {
    dir.as_ref().join(category).join(FILE_NAME)
}

/// Writes the rotation, creating the category directory if needed.
pub fn save(dir: impl AsRef<Path>, rotation: &StoredRotation) -> Result<PathBuf, StoreError> {
    let path = path_for(dir, &rotation.category);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, rotation.to_json()?)?;
    Ok(path)
}

/// Reads the rotation of `category`.
///
/// # Errors
///
/// Fails on a missing file, malformed JSON, an invalid pair, or a file whose
/// category label does not match.
pub fn load(dir: impl AsRef<Path>, category: &str) -> Result<StoredRotation, StoreError> {
    let text = fs::read_to_string(path_for(dir, category))?;
    let rotation = StoredRotation::from_json(&text)?;
    if rotation.category != category {
        return Err(StoreError::CategoryMismatch {
            expected: category.to_string(),
            found: rotation.category,
        });
    }
    Ok(rotation)
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
