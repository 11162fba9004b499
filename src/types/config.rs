//! Scoring configuration

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::types::{DerError, DerResult, RegionMode};
use crate::DEFAULT_COLLAR;

/// Knobs for one scoring run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Region filter
    pub regions: RegionMode,
    /// Collar in seconds around each reference boundary
    pub collar: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            regions: RegionMode::All,
            collar: DEFAULT_COLLAR,
        }
    }
}

impl ScoringConfig {
    pub fn new(regions: RegionMode, collar: f64) -> Self {
        Self { regions, collar }
    }

    /// Reject a negative or non-finite collar
    pub fn validate(&self) -> DerResult<()> {
        if !self.collar.is_finite() || self.collar < 0.0 {
            return Err(DerError::InvalidCollar(self.collar));
        }
        Ok(())
    }

    /// Load from a JSON file; missing fields fall back to defaults
    pub fn from_file(path: impl AsRef<Path>) -> DerResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| DerError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> DerResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
