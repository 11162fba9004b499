//! Turn model: one labeled time interval
//!
//! The same shape serves all three namespaces. In a reference or
//! hypothesis the label is a speaker; in a mask it is a placeholder
//! (usually the recording id).

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::types::{DerError, DerResult};

/// Recording id → its turns
pub type Recordings = BTreeMap<String, Vec<Turn>>;

/// A single labeled interval `[start, end]` in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Speaker label (or mask label)
    pub speaker: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl Turn {
    /// Create a turn (not validated, see `validate`)
    pub fn new(speaker: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            speaker: speaker.into(),
            start,
            end,
        }
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Check `start <= end` with both timestamps finite
    pub fn validate(&self) -> DerResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() || self.start > self.end {
            return Err(DerError::InvalidInterval {
                speaker: self.speaker.clone(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_turn() {
        let turn = Turn::new("A", 1.5, 4.0);
        assert_eq!(turn.speaker, "A");
        assert!((turn.duration() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_validate_accepts_zero_length() {
        assert!(Turn::new("A", 3.0, 3.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_reversed() {
        let err = Turn::new("A", 5.0, 3.0).validate().unwrap_err();
        assert_eq!(err.code(), "E001_INVALID_INTERVAL");
    }

    #[test]
    fn test_validate_rejects_nan() {
        assert!(Turn::new("A", f64::NAN, 3.0).validate().is_err());
        assert!(Turn::new("A", 0.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Turn::new("A", 0.0, 1.0)).unwrap();
        assert!(json.contains("\"speaker\":\"A\""));
        let back: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Turn::new("A", 0.0, 1.0));
    }
}
