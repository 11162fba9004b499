//! Sweep events: boundary markers fed to the region sweep
//!
//! Ordering is total:
//! 1. by timestamp (`f64::total_cmp`, with -0.0 equal to +0.0)
//! 2. End before Start at the same timestamp
//! 3. by namespace, mask outermost:
//!    - Start: Mask < Ref < Hyp
//!    - End:   Hyp < Ref < Mask
//! 4. by speaker label, so equal-key events sort deterministically

use std::cmp::Ordering;

/// Boundary kind. Declaration order is the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    End,
    Start,
}

/// Which interval set an event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Ref,
    Hyp,
    Mask,
}

impl Namespace {
    /// Rank among same-kind events at one timestamp
    fn rank(self, kind: EventKind) -> u8 {
        match (kind, self) {
            (EventKind::Start, Namespace::Mask) => 0,
            (EventKind::Start, Namespace::Ref) => 1,
            (EventKind::Start, Namespace::Hyp) => 2,
            (EventKind::End, Namespace::Hyp) => 0,
            (EventKind::End, Namespace::Ref) => 1,
            (EventKind::End, Namespace::Mask) => 2,
        }
    }
}

/// One boundary in the event stream
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub namespace: Namespace,
    pub speaker: String,
    pub timestamp: f64,
}

impl Event {
    pub fn start(namespace: Namespace, speaker: impl Into<String>, timestamp: f64) -> Self {
        Self { kind: EventKind::Start, namespace, speaker: speaker.into(), timestamp }
    }

    pub fn end(namespace: Namespace, speaker: impl Into<String>, timestamp: f64) -> Self {
        Self { kind: EventKind::End, namespace, speaker: speaker.into(), timestamp }
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // + 0.0 folds -0.0 into +0.0 so IEEE-equal times tie
        (self.timestamp + 0.0)
            .total_cmp(&(other.timestamp + 0.0))
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| {
                self.namespace
                    .rank(self.kind)
                    .cmp(&other.namespace.rank(other.kind))
            })
            .then_with(|| self.speaker.cmp(&other.speaker))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
