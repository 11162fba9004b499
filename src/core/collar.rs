//! Collar Adjuster: carve reference boundaries out of the mask
//!
//! Each reference turn `[s, e]` removes `[s-c, s+c]` and `[e-c, e+c]`
//! from the mask. The mask's own Start/End events and the reference
//! collar events go through one depth sweep; what stays positive is the
//! new mask.

use tracing::debug;
use crate::core::sweep::{evaluation_regions, sweep_mask_spans, EventStream};
use crate::core::IntervalSet;
use crate::types::{DerError, DerResult, Namespace, Region};
use crate::DEFAULT_MASK_LABEL;

/// Collar must be finite and non-negative
pub fn check_collar(collar: f64) -> DerResult<()> {
    if !collar.is_finite() || collar < 0.0 {
        return Err(DerError::InvalidCollar(collar));
    }
    Ok(())
}

/// New mask with a `2 * collar` gap around every reference boundary.
/// A zero collar returns the mask unchanged.
pub fn apply_collar(mask: &IntervalSet, reference: &IntervalSet, collar: f64) -> DerResult<IntervalSet> {
    check_collar(collar)?;
    if collar == 0.0 {
        return Ok(mask.clone());
    }

    let label = mask
        .turns()
        .first()
        .map_or(DEFAULT_MASK_LABEL, |t| t.speaker.as_str())
        .to_string();

    let mut stream = EventStream::with_capacity(2 * mask.len() + 4 * reference.len());
    stream.push_turns(Namespace::Mask, mask);
    stream.push_collar_boundaries(Namespace::Ref, reference, collar);
    let spans = sweep_mask_spans(&stream.into_sorted(), &label);

    let adjusted = IntervalSet::build(spans)?;
    debug!(
        collar,
        before = mask.total_duration(),
        after = adjusted.total_duration(),
        spans = adjusted.len(),
        "applied collar to mask"
    );
    Ok(adjusted)
}

/// Evaluation regions over the collar-adjusted mask
pub fn collar_adjusted_regions(
    reference: &IntervalSet,
    hypothesis: &IntervalSet,
    mask: &IntervalSet,
    collar: f64,
) -> DerResult<Vec<Region>> {
    let adjusted = apply_collar(mask, reference, collar)?;
    Ok(evaluation_regions(reference, hypothesis, Some(&adjusted)))
}

// =============================================================================
// TESTS
// =============================================================================
