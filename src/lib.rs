//! Spyder: diarization error rate (DER) scoring
//!
//! Reference turns, hypothesis turns and an evaluation mask (UEM) go in;
//! missed speech, false alarm and speaker confusion rates come out.
//!
//! Pipeline: merge → evaluation regions → optimal speaker correspondence
//! → collar → evaluation regions again → aggregate.

pub mod core;
pub mod types;

pub use crate::core::{compute_der, compute_der_with_solver, score_corpus};
pub use crate::types::{DerError, DerResult, Metrics, RegionMode, ScoringConfig, Turn};

// =============================================================================
// SWEEP
// =============================================================================

/// Spans at or below this width are never materialized as regions or mask
/// spans. Guards against coincident timestamps, not a timing tolerance.
pub const REGION_EPSILON: f64 = f64::EPSILON;

// =============================================================================
// SCORING DEFAULTS
// =============================================================================

/// Collar in seconds applied around every reference boundary
pub const DEFAULT_COLLAR: f64 = 0.0;

/// Label given to a synthesized mask turn when no UEM is supplied
pub const DEFAULT_MASK_LABEL: &str = "_";

// =============================================================================
// SERVICE
// =============================================================================

/// Default listen address for `spyder --serve`
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "0.2.0";
