//! Metrics Aggregator: regions → duration-weighted error rates

use crate::types::{Metrics, Region, RegionMode};

/// Absolute error durations before normalization (seconds)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ErrorTotals {
    /// Reference speech, once per active reference speaker
    pub duration: f64,
    pub miss: f64,
    pub falarm: f64,
    pub conf: f64,
    /// Wall-clock time of the retained regions
    pub scored: f64,
}

impl ErrorTotals {
    /// Add one region's contribution
    pub fn add(&mut self, region: &Region) {
        let dur = region.duration();
        let n_ref = region.n_ref();
        let n_hyp = region.n_hyp();
        let n_correct = region.num_correct();

        self.miss += dur * n_ref.saturating_sub(n_hyp) as f64;
        self.falarm += dur * n_hyp.saturating_sub(n_ref) as f64;
        self.conf += dur * (n_ref.min(n_hyp) - n_correct) as f64;
        self.duration += dur * n_ref as f64;
        self.scored += dur;
    }

    pub fn into_metrics(self) -> Metrics {
        Metrics::from_totals(self.duration, self.miss, self.falarm, self.conf)
    }
}

/// Sum the regions `mode` accepts. Rejected regions contribute nothing.
pub fn accumulate<'a>(regions: impl IntoIterator<Item = &'a Region>, mode: RegionMode) -> ErrorTotals {
    let mut totals = ErrorTotals::default();
    for region in regions {
        if mode.accepts(region.n_ref()) {
            totals.add(region);
        }
    }
    totals
}

/// Error rates over `regions` filtered by `mode`
pub fn aggregate(regions: &[Region], mode: RegionMode) -> Metrics {
    accumulate(regions, mode).into_metrics()
}

// =============================================================================
// TESTS
// =============================================================================
