//! Interval Set: the turns of one namespace plus a speaker index
//!
//! The index (speaker set, label → id, id → label) is a cache over the
//! current turns. Every mutation here rebuilds it, so readers never see
//! a stale index.

use std::collections::{BTreeMap, BTreeSet};
use crate::types::{DerError, DerResult, LabelMap, Turn};

/// Validated turns for one namespace (reference, hypothesis or mask)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntervalSet {
    turns: Vec<Turn>,
    speaker_set: BTreeSet<String>,
    forward_index: BTreeMap<String, usize>,
    reverse_index: Vec<String>,
}

impl IntervalSet {
    /// Validate every turn and build the set. One bad turn rejects all.
    pub fn build(turns: Vec<Turn>) -> DerResult<Self> {
        for turn in &turns {
            turn.validate()?;
        }
        let mut set = Self {
            turns,
            ..Self::default()
        };
        set.build_speaker_index();
        Ok(set)
    }

    /// Set with no turns
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Union overlapping or touching turns of the same speaker.
    ///
    /// Turns are grouped by label, sorted by start (stable), then swept
    /// once: a turn starting at or before the running end extends it,
    /// otherwise it opens a new merged turn.
    pub fn merge_same_speaker_turns(&mut self) {
        let mut by_speaker: BTreeMap<String, Vec<Turn>> = BTreeMap::new();
        for turn in self.turns.drain(..) {
            by_speaker.entry(turn.speaker.clone()).or_default().push(turn);
        }

        let mut merged: Vec<Turn> = Vec::new();
        for (_, mut spk_turns) in by_speaker {
            spk_turns.sort_by(|a, b| a.start.total_cmp(&b.start));

            let mut current: Option<Turn> = None;
            for turn in spk_turns {
                if let Some(cur) = current.as_mut() {
                    if turn.start <= cur.end {
                        cur.end = cur.end.max(turn.end);
                        continue;
                    }
                }
                if let Some(done) = current.replace(turn) {
                    merged.push(done);
                }
            }
            merged.extend(current);
        }

        self.turns = merged;
        self.build_speaker_index();
    }

    /// Recompute speaker set and ids. Ids are dense from 0 in
    /// lexicographic label order.
    pub fn build_speaker_index(&mut self) {
        self.speaker_set = self.turns.iter().map(|t| t.speaker.clone()).collect();
        self.reverse_index = self.speaker_set.iter().cloned().collect();
        self.forward_index = self
            .reverse_index
            .iter()
            .enumerate()
            .map(|(id, label)| (label.clone(), id))
            .collect();
    }

    /// Replace every label through `mapping`.
    ///
    /// The mapping must cover every current label; otherwise nothing is
    /// changed and `IncompleteLabelMapping` names the first missing one.
    pub fn map_labels(&mut self, mapping: &LabelMap) -> DerResult<()> {
        if let Some(missing) = self.speaker_set.iter().find(|s| !mapping.contains_key(*s)) {
            return Err(DerError::IncompleteLabelMapping {
                speaker: missing.clone(),
            });
        }
        for turn in &mut self.turns {
            if let Some(label) = mapping.get(&turn.speaker) {
                turn.speaker = label.clone();
            }
        }
        self.build_speaker_index();
        Ok(())
    }

    pub fn speaker_set(&self) -> &BTreeSet<String> {
        &self.speaker_set
    }

    pub fn num_speakers(&self) -> usize {
        self.reverse_index.len()
    }

    /// Id of a speaker label
    pub fn speaker_id(&self, label: &str) -> Option<usize> {
        self.forward_index.get(label).copied()
    }

    /// Label of a speaker id
    pub fn speaker_label(&self, id: usize) -> Option<&str> {
        self.reverse_index.get(id).map(String::as_str)
    }

    /// Earliest start and latest end, if any turn exists
    pub fn extent(&self) -> Option<(f64, f64)> {
        let start = self.turns.iter().map(|t| t.start).min_by(f64::total_cmp)?;
        let end = self.turns.iter().map(|t| t.end).max_by(f64::total_cmp)?;
        Some((start, end))
    }

    /// Summed turn durations (overlaps counted per turn)
    pub fn total_duration(&self) -> f64 {
        self.turns.iter().map(Turn::duration).sum()
    }
}

// =============================================================================
// TESTS
// =============================================================================
