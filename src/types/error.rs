//! Error types for DER scoring

use thiserror::Error;

/// Everything that can stop a scoring call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DerError {
    /// Turn with start > end (or a non-finite timestamp)
    #[error("invalid interval for '{speaker}': start {start} is after end {end}")]
    InvalidInterval { speaker: String, start: f64, end: f64 },

    /// Relabeling met a speaker the mapping does not cover
    #[error("label mapping has no entry for speaker '{speaker}'")]
    IncompleteLabelMapping { speaker: String },

    /// Assignment solver could not produce an assignment
    #[error("assignment solver failed: {0}")]
    SolverFailure(String),

    #[error("collar must be finite and non-negative, got {0}")]
    InvalidCollar(f64),

    #[error("unknown region mode '{0}' (expected all, single, nonoverlap or overlap)")]
    UnknownRegionMode(String),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("cannot read {path}: {message}")]
    Io { path: String, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DerError {
    /// Stable code string (for CLI output and HTTP error bodies)
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInterval { .. } => "E001_INVALID_INTERVAL",
            Self::IncompleteLabelMapping { .. } => "E002_INCOMPLETE_LABEL_MAPPING",
            Self::SolverFailure(_) => "E003_SOLVER_FAILURE",
            Self::InvalidCollar(_) => "E004_INVALID_COLLAR",
            Self::UnknownRegionMode(_) => "E005_UNKNOWN_REGION_MODE",
            Self::Parse { .. } => "E006_PARSE",
            Self::Io { .. } => "E007_IO",
            Self::Config(_) => "E008_CONFIG",
        }
    }

    /// Caller can fix the input and retry. Label-mapping and solver
    /// failures are internal and not recoverable by the caller.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::IncompleteLabelMapping { .. } | Self::SolverFailure(_)
        )
    }
}

/// Result type for scoring operations
pub type DerResult<T> = Result<T, DerError>;
