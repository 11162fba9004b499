//! Orchestrator: merge → correspondence → collar → re-sweep → aggregate

use tracing::debug;
use crate::core::{
    aggregate, check_collar, collar_adjusted_regions, evaluation_regions, resolve,
    AssignmentSolver, HungarianSolver, IntervalSet,
};
use crate::types::{DerResult, Metrics, RegionMode, Turn};
use crate::DEFAULT_MASK_LABEL;

/// Score `hypothesis` against `reference` inside `mask`.
///
/// Without a mask the scored span is `[min start, max end]` over both
/// sets. With no turns at all every rate is zero.
pub fn compute_der(
    reference: IntervalSet,
    hypothesis: IntervalSet,
    mask: Option<IntervalSet>,
    regions: RegionMode,
    collar: f64,
) -> DerResult<Metrics> {
    compute_der_with_solver(reference, hypothesis, mask, regions, collar, &HungarianSolver)
}

/// `compute_der` with a caller-supplied assignment solver
pub fn compute_der_with_solver<S: AssignmentSolver + ?Sized>(
    mut reference: IntervalSet,
    mut hypothesis: IntervalSet,
    mask: Option<IntervalSet>,
    regions: RegionMode,
    collar: f64,
    solver: &S,
) -> DerResult<Metrics> {
    check_collar(collar)?;

    reference.merge_same_speaker_turns();
    hypothesis.merge_same_speaker_turns();
    let mut mask = match mask {
        Some(mask) => mask,
        None => match default_mask(&reference, &hypothesis)? {
            Some(mask) => mask,
            None => return Ok(Metrics::default()),
        },
    };
    mask.merge_same_speaker_turns();

    let raw_regions = evaluation_regions(&reference, &hypothesis, Some(&mask));
    debug!(
        ref_turns = reference.len(),
        hyp_turns = hypothesis.len(),
        mask_turns = mask.len(),
        regions = raw_regions.len(),
        "built evaluation regions"
    );

    let correspondence = resolve(&mut reference, &mut hypothesis, &raw_regions, solver)?;

    let scored = collar_adjusted_regions(&reference, &hypothesis, &mask, collar)?;
    debug!(regions = scored.len(), mode = %regions, collar, "scoring regions");

    Ok(aggregate(&scored, regions).with_label_maps(correspondence.ref_map, correspondence.hyp_map))
}

/// One mask turn over the combined extent, or `None` when both sets are empty
fn default_mask(reference: &IntervalSet, hypothesis: &IntervalSet) -> DerResult<Option<IntervalSet>> {
    let extent = match (reference.extent(), hypothesis.extent()) {
        (Some((rs, re)), Some((hs, he))) => Some((rs.min(hs), re.max(he))),
        (one, other) => one.or(other),
    };
    extent
        .map(|(start, end)| IntervalSet::build(vec![Turn::new(DEFAULT_MASK_LABEL, start, end)]))
        .transpose()
}

// =============================================================================
// TESTS
// =============================================================================
