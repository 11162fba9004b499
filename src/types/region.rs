//! Regions: maximal spans with constant active-speaker sets

use std::collections::BTreeSet;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::types::DerError;

/// Homogeneous span inside the evaluation mask
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub start: f64,
    pub end: f64,
    pub ref_speakers: BTreeSet<String>,
    pub hyp_speakers: BTreeSet<String>,
}

impl Region {
    pub fn new(
        start: f64,
        end: f64,
        ref_speakers: BTreeSet<String>,
        hyp_speakers: BTreeSet<String>,
    ) -> Self {
        Self { start, end, ref_speakers, hyp_speakers }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Number of active reference speakers
    pub fn n_ref(&self) -> usize {
        self.ref_speakers.len()
    }

    /// Number of active hypothesis speakers
    pub fn n_hyp(&self) -> usize {
        self.hyp_speakers.len()
    }

    /// Reference speakers also active in the hypothesis
    pub fn num_correct(&self) -> usize {
        self.ref_speakers.intersection(&self.hyp_speakers).count()
    }
}

/// Which regions contribute to scoring, by reference speaker count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionMode {
    /// Every region
    #[default]
    All,
    /// Exactly one reference speaker
    Single,
    /// At most one reference speaker (includes reference silence)
    Nonoverlap,
    /// Two or more reference speakers
    Overlap,
}

impl RegionMode {
    pub const ALL_MODES: [RegionMode; 4] = [
        RegionMode::All,
        RegionMode::Single,
        RegionMode::Nonoverlap,
        RegionMode::Overlap,
    ];

    /// Does a region with `n_ref` reference speakers pass this filter?
    pub fn accepts(&self, n_ref: usize) -> bool {
        match self {
            RegionMode::All => true,
            RegionMode::Single => n_ref == 1,
            RegionMode::Nonoverlap => n_ref <= 1,
            RegionMode::Overlap => n_ref > 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionMode::All => "all",
            RegionMode::Single => "single",
            RegionMode::Nonoverlap => "nonoverlap",
            RegionMode::Overlap => "overlap",
        }
    }
}

impl FromStr for RegionMode {
    type Err = DerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(RegionMode::All),
            "single" => Ok(RegionMode::Single),
            "nonoverlap" => Ok(RegionMode::Nonoverlap),
            "overlap" => Ok(RegionMode::Overlap),
            _ => Err(DerError::UnknownRegionMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for RegionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// TESTS
// =============================================================================
