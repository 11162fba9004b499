//! Correspondence Resolver: reference ↔ hypothesis speaker mapping
//!
//! Overlap is measured over evaluation regions, so time outside the mask
//! never influences the mapping. The solver minimizes, so each cell holds
//! the negated overlap.

use std::collections::BTreeSet;
use tracing::debug;
use crate::core::{Assignment, AssignmentSolver, CostMatrix, IntervalSet};
use crate::types::{DerError, DerResult, LabelMap, Region};

/// Label maps into the shared label space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Correspondence {
    pub ref_map: LabelMap,
    pub hyp_map: LabelMap,
}

/// `M × N` matrix, `cost[i][j]` = minus the time reference speaker `i`
/// and hypothesis speaker `j` are both active, summed over `regions`.
///
/// Both sets must have a speaker index covering every label in `regions`.
pub fn build_cost_matrix(
    reference: &IntervalSet,
    hypothesis: &IntervalSet,
    regions: &[Region],
) -> DerResult<CostMatrix> {
    let mut cost = vec![vec![0.0; hypothesis.num_speakers()]; reference.num_speakers()];

    for region in regions {
        let duration = region.duration();
        for ref_spk in &region.ref_speakers {
            let i = reference
                .speaker_id(ref_spk)
                .ok_or_else(|| DerError::IncompleteLabelMapping { speaker: ref_spk.clone() })?;
            for hyp_spk in &region.hyp_speakers {
                let j = hypothesis
                    .speaker_id(hyp_spk)
                    .ok_or_else(|| DerError::IncompleteLabelMapping { speaker: hyp_spk.clone() })?;
                cost[i][j] -= duration;
            }
        }
    }

    Ok(cost)
}

/// Shared labels "0", "1", … from an assignment.
///
/// Matched pairs are numbered first, in reference index order. The
/// counter then continues over unmatched reference speakers and then
/// unmatched hypothesis speakers, each in label order.
pub fn label_maps(
    reference: &IntervalSet,
    hypothesis: &IntervalSet,
    assignment: &Assignment,
) -> DerResult<Correspondence> {
    if assignment.rows.len() != reference.num_speakers() {
        return Err(DerError::SolverFailure(format!(
            "assignment has {} rows for {} reference speakers",
            assignment.rows.len(),
            reference.num_speakers()
        )));
    }

    let mut next = 0usize;
    let mut label = || {
        let l = next.to_string();
        next += 1;
        l
    };

    let mut ref_map = LabelMap::new();
    let mut hyp_map = LabelMap::new();
    let mut ref_remaining: BTreeSet<&str> = reference.speaker_set().iter().map(String::as_str).collect();
    let mut hyp_remaining: BTreeSet<&str> = hypothesis.speaker_set().iter().map(String::as_str).collect();

    for (i, j) in assignment.pairs() {
        let ref_spk = reference
            .speaker_label(i)
            .ok_or_else(|| DerError::SolverFailure(format!("row {} out of range", i)))?;
        let hyp_spk = hypothesis
            .speaker_label(j)
            .ok_or_else(|| DerError::SolverFailure(format!("column {} out of range", j)))?;
        if !hyp_remaining.remove(hyp_spk) {
            return Err(DerError::SolverFailure(format!(
                "hypothesis speaker '{}' assigned twice",
                hyp_spk
            )));
        }
        ref_remaining.remove(ref_spk);

        let shared = label();
        ref_map.insert(ref_spk.to_string(), shared.clone());
        hyp_map.insert(hyp_spk.to_string(), shared);
    }

    for spk in ref_remaining {
        ref_map.insert(spk.to_string(), label());
    }
    for spk in hyp_remaining {
        hyp_map.insert(spk.to_string(), label());
    }

    Ok(Correspondence { ref_map, hyp_map })
}

/// Relabel both sets into the shared label space
pub fn map_labels(
    reference: &mut IntervalSet,
    hypothesis: &mut IntervalSet,
    assignment: &Assignment,
) -> DerResult<Correspondence> {
    let correspondence = label_maps(reference, hypothesis, assignment)?;
    reference.map_labels(&correspondence.ref_map)?;
    hypothesis.map_labels(&correspondence.hyp_map)?;
    Ok(correspondence)
}

/// Cost matrix → solver → relabel
pub fn resolve<S: AssignmentSolver + ?Sized>(
    reference: &mut IntervalSet,
    hypothesis: &mut IntervalSet,
    regions: &[Region],
    solver: &S,
) -> DerResult<Correspondence> {
    reference.build_speaker_index();
    hypothesis.build_speaker_index();

    let cost = build_cost_matrix(reference, hypothesis, regions)?;
    let assignment = solver.solve(&cost)?;
    debug!(
        ref_speakers = reference.num_speakers(),
        hyp_speakers = hypothesis.num_speakers(),
        matched = assignment.pairs().count(),
        overlap = -assignment.cost,
        "resolved speaker correspondence"
    );

    map_labels(reference, hypothesis, &assignment)
}

// =============================================================================
// TESTS
// =============================================================================
