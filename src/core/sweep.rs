//! Event Sweep: interval sets → sorted boundary events → regions
//!
//! Two sweeps share one event stream type:
//! - `sweep_regions` tracks active speaker sets and a mask depth and
//!   emits homogeneous regions inside the mask.
//! - `sweep_mask_spans` only counts Start/End depth and emits the spans
//!   where depth is positive. The collar step uses it to carve the mask.

use std::collections::BTreeSet;
use crate::core::IntervalSet;
use crate::types::{Event, EventKind, Namespace, Region, Turn};
use crate::REGION_EPSILON;

/// Unsorted collection of sweep events
#[derive(Debug, Default)]
pub struct EventStream {
    events: Vec<Event>,
}

impl EventStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    /// Two events per turn. Zero-length turns cover no time and are
    /// skipped: their End would sort before their Start.
    pub fn push_turns(&mut self, namespace: Namespace, set: &IntervalSet) {
        for turn in set.turns().iter().filter(|t| t.end > t.start) {
            self.events.push(Event::start(namespace, turn.speaker.as_str(), turn.start));
            self.events.push(Event::end(namespace, turn.speaker.as_str(), turn.end));
        }
    }

    /// Four events per turn closing a `2 * collar` window around each
    /// boundary: End(s-c), Start(s+c), End(e-c), Start(e+c).
    pub fn push_collar_boundaries(&mut self, namespace: Namespace, set: &IntervalSet, collar: f64) {
        for turn in set.turns() {
            let spk = turn.speaker.as_str();
            self.events.push(Event::end(namespace, spk, turn.start - collar));
            self.events.push(Event::start(namespace, spk, turn.start + collar));
            self.events.push(Event::end(namespace, spk, turn.end - collar));
            self.events.push(Event::start(namespace, spk, turn.end + collar));
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events in sweep order
    pub fn into_sorted(mut self) -> Vec<Event> {
        self.events.sort();
        self.events
    }
}

/// Sweep sorted events into regions.
///
/// With `masked == false` the whole timeline counts as inside the mask.
/// A region is emitted at each boundary when inside the mask and the
/// span since the previous boundary is wider than `REGION_EPSILON`.
pub fn sweep_regions(events: &[Event], masked: bool) -> Vec<Region> {
    let mut regions = Vec::new();
    let Some(first) = events.first() else {
        return regions;
    };

    let mut active_ref: BTreeSet<String> = BTreeSet::new();
    let mut active_hyp: BTreeSet<String> = BTreeSet::new();
    let mut mask_depth: i64 = 0;
    let mut boundary = first.timestamp;

    for event in events {
        let inside = !masked || mask_depth >= 1;
        if inside && event.timestamp - boundary > REGION_EPSILON {
            regions.push(Region::new(
                boundary,
                event.timestamp,
                active_ref.clone(),
                active_hyp.clone(),
            ));
        }

        match (event.namespace, event.kind) {
            (Namespace::Ref, EventKind::Start) => {
                active_ref.insert(event.speaker.clone());
            }
            (Namespace::Ref, EventKind::End) => {
                active_ref.remove(&event.speaker);
            }
            (Namespace::Hyp, EventKind::Start) => {
                active_hyp.insert(event.speaker.clone());
            }
            (Namespace::Hyp, EventKind::End) => {
                active_hyp.remove(&event.speaker);
            }
            (Namespace::Mask, EventKind::Start) => mask_depth += 1,
            (Namespace::Mask, EventKind::End) => mask_depth -= 1,
        }

        boundary = event.timestamp;
    }

    regions
}

/// Sweep sorted events by nesting depth alone (any Start +1, any End -1)
/// and emit a `label` turn for every span closed when depth returns to 0.
pub fn sweep_mask_spans(events: &[Event], label: &str) -> Vec<Turn> {
    let mut spans = Vec::new();
    let Some(first) = events.first() else {
        return spans;
    };

    let mut depth: i64 = 0;
    let mut span_start = first.timestamp;

    for event in events {
        match event.kind {
            EventKind::Start => {
                depth += 1;
                if depth == 1 {
                    span_start = event.timestamp;
                }
            }
            EventKind::End => {
                depth -= 1;
                if depth == 0 && event.timestamp - span_start > REGION_EPSILON {
                    spans.push(Turn::new(label, span_start, event.timestamp));
                }
            }
        }
    }

    spans
}

/// Regions over raw reference/hypothesis boundaries, restricted to the
/// mask when one is given.
pub fn evaluation_regions(
    reference: &IntervalSet,
    hypothesis: &IntervalSet,
    mask: Option<&IntervalSet>,
) -> Vec<Region> {
    let capacity = 2 * (reference.len() + hypothesis.len() + mask.map_or(0, IntervalSet::len));
    let mut stream = EventStream::with_capacity(capacity);
    if let Some(mask) = mask {
        stream.push_turns(Namespace::Mask, mask);
    }
    stream.push_turns(Namespace::Ref, reference);
    stream.push_turns(Namespace::Hyp, hypothesis);

    let events = stream.into_sorted();
    sweep_regions(&events, mask.is_some())
}

// =============================================================================
// TESTS
// =============================================================================
