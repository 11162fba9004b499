//! Corpus scoring: one `compute_der` per reference recording

use std::collections::BTreeMap;
use tracing::{debug, info, warn};
use crate::core::{compute_der, IntervalSet};
use crate::types::{CorpusReport, DerResult, Recordings, ScoringConfig};

/// Score every reference recording and pool the totals.
///
/// A recording missing from `hypothesis` is scored against an empty
/// hypothesis. A recording missing from `uem` gets the default mask.
/// Hypothesis recordings without a reference are skipped.
pub fn score_corpus(
    reference: &Recordings,
    hypothesis: &Recordings,
    uem: Option<&Recordings>,
    config: &ScoringConfig,
) -> DerResult<CorpusReport> {
    config.validate()?;

    for file in hypothesis.keys().filter(|f| !reference.contains_key(*f)) {
        warn!(file = %file, "hypothesis recording has no reference, skipping");
    }

    let mut per_file = BTreeMap::new();
    for (file, ref_turns) in reference {
        let ref_set = IntervalSet::build(ref_turns.clone())?;
        let hyp_set = match hypothesis.get(file) {
            Some(turns) => IntervalSet::build(turns.clone())?,
            None => {
                debug!(file = %file, "no hypothesis for recording");
                IntervalSet::empty()
            }
        };
        let mask = uem
            .and_then(|u| u.get(file))
            .map(|turns| IntervalSet::build(turns.clone()))
            .transpose()?;

        let metrics = compute_der(ref_set, hyp_set, mask, config.regions, config.collar)?;
        debug!(file = %file, der = metrics.der, "scored recording");
        per_file.insert(file.clone(), metrics);
    }

    let report = CorpusReport::new(*config, per_file);
    info!(
        recordings = report.per_file.len(),
        der = report.overall.der,
        "scored corpus"
    );
    Ok(report)
}

// =============================================================================
// TESTS
// =============================================================================
