//! Integration tests for single-recording scoring
//!
//! Tests the full path: turns → IntervalSet → compute_der → Metrics

use spyder::core::{apply_collar, evaluation_regions, IntervalSet};
use spyder::types::{DerError, RegionMode, Turn};
use spyder::compute_der;

fn set(turns: &[(&str, f64, f64)]) -> IntervalSet {
    IntervalSet::build(turns.iter().map(|(s, a, b)| Turn::new(*s, *a, *b)).collect()).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Overlapping same-speaker turns merge into one
#[test]
fn test_merge_overlapping_turns() {
    let mut s = set(&[("A", 0.0, 5.0), ("A", 3.0, 8.0)]);
    s.merge_same_speaker_turns();
    assert_eq!(s.turns(), &[Turn::new("A", 0.0, 8.0)]);
}

/// Touching same-speaker turns merge into one
#[test]
fn test_merge_touching_turns() {
    let mut s = set(&[("A", 0.0, 5.0), ("A", 5.0, 9.0)]);
    s.merge_same_speaker_turns();
    assert_eq!(s.turns(), &[Turn::new("A", 0.0, 9.0)]);
}

/// Identical reference and hypothesis score zero
#[test]
fn test_identical_sets_score_zero() {
    let turns = [("A", 0.0, 4.0), ("B", 3.0, 9.0), ("C", 9.5, 12.0), ("A", 11.0, 15.0)];
    let m = compute_der(set(&turns), set(&turns), Some(set(&[("_", 0.0, 15.0)])), RegionMode::All, 0.0)
        .unwrap();
    assert_eq!(m.der, 0.0);
    assert_eq!(m.miss, 0.0);
    assert_eq!(m.falarm, 0.0);
    assert_eq!(m.conf, 0.0);
    assert!(close(m.duration, 4.0 + 6.0 + 2.5 + 4.0));
}

/// Different labels for the same speech still score zero
#[test]
fn test_relabelled_single_speaker() {
    let m = compute_der(
        set(&[("A", 0.0, 10.0)]),
        set(&[("B", 0.0, 10.0)]),
        Some(set(&[("_", 0.0, 10.0)])),
        RegionMode::All,
        0.0,
    )
    .unwrap();
    assert_eq!(m.der, 0.0);
    assert_eq!(m.ref_label_map["A"], "0");
    assert_eq!(m.hyp_label_map["B"], "0");
}

/// No hypothesis turns: everything is missed
#[test]
fn test_empty_hypothesis() {
    let m = compute_der(
        set(&[("A", 0.0, 10.0)]),
        IntervalSet::empty(),
        Some(set(&[("_", 0.0, 10.0)])),
        RegionMode::All,
        0.0,
    )
    .unwrap();
    assert!(close(m.miss, 1.0));
    assert_eq!(m.falarm, 0.0);
    assert_eq!(m.conf, 0.0);
    assert!(close(m.der, 1.0));
}

/// Two hypothesis speakers over one reference speaker
#[test]
fn test_extra_hypothesis_speaker() {
    let m = compute_der(
        set(&[("A", 0.0, 10.0)]),
        set(&[("B", 0.0, 10.0), ("C", 0.0, 10.0)]),
        Some(set(&[("_", 0.0, 10.0)])),
        RegionMode::All,
        0.0,
    )
    .unwrap();
    assert!(close(m.falarm, 1.0));
    assert_eq!(m.conf, 0.0);
    assert!(close(m.der, 1.0));
    // one of B/C shares A's label, the other gets a fresh one
    let shared = &m.ref_label_map["A"];
    let matched = m.hyp_label_map.values().filter(|l| *l == shared).count();
    assert_eq!(matched, 1);
    assert_eq!(m.hyp_label_map.len(), 2);
}

/// Zero collar leaves the mask, and so the regions, unchanged
#[test]
fn test_zero_collar_regions_match_raw() {
    let r = set(&[("A", 0.0, 6.0), ("B", 4.0, 12.0)]);
    let h = set(&[("x", 1.0, 7.0), ("y", 7.0, 12.0)]);
    let mask = set(&[("rec", 0.0, 12.0)]);
    let adjusted = apply_collar(&mask, &r, 0.0).unwrap();
    assert_eq!(
        evaluation_regions(&r, &h, Some(&adjusted)),
        evaluation_regions(&r, &h, Some(&mask))
    );
}

/// Mixed errors with hand-computed totals
#[test]
fn test_mixed_errors() {
    // ref: A [0,10], B [10,20]
    // hyp: x [0,8] matches A, y [8,20] matches B (overlap 10 vs 2 with A)
    //      z [20,22] is speech with no reference
    let m = compute_der(
        set(&[("A", 0.0, 10.0), ("B", 10.0, 20.0)]),
        set(&[("x", 0.0, 8.0), ("y", 8.0, 20.0), ("z", 20.0, 22.0)]),
        Some(set(&[("rec", 0.0, 22.0)])),
        RegionMode::All,
        0.0,
    )
    .unwrap();
    assert!(close(m.duration, 20.0));
    assert_eq!(m.miss, 0.0);
    assert!(close(m.conf, 2.0 / 20.0));
    assert!(close(m.falarm, 2.0 / 20.0));
    assert!(close(m.der, 0.2));
}

/// Collar removes boundary jitter from scoring
#[test]
fn test_collar_tolerates_jitter() {
    let r = set(&[("A", 0.0, 5.0), ("B", 5.0, 10.0)]);
    let h = set(&[("x", 0.0, 5.2), ("y", 5.2, 10.0)]);
    let mask = set(&[("rec", 0.0, 10.0)]);

    let strict = compute_der(r.clone(), h.clone(), Some(mask.clone()), RegionMode::All, 0.0).unwrap();
    assert!(close(strict.conf, 0.2 / 10.0));

    let lenient = compute_der(r, h, Some(mask), RegionMode::All, 0.25).unwrap();
    assert_eq!(lenient.der, 0.0);
}

/// Region modes select different parts of the same recording
#[test]
fn test_region_modes() {
    let r = set(&[("A", 0.0, 10.0), ("B", 6.0, 10.0)]);
    let h = set(&[("x", 0.0, 10.0)]);
    let mask = Some(set(&[("rec", 0.0, 10.0)]));

    let all = compute_der(r.clone(), h.clone(), mask.clone(), RegionMode::All, 0.0).unwrap();
    let single = compute_der(r.clone(), h.clone(), mask.clone(), RegionMode::Single, 0.0).unwrap();
    let overlap = compute_der(r.clone(), h.clone(), mask.clone(), RegionMode::Overlap, 0.0).unwrap();
    let nonoverlap = compute_der(r, h, mask, RegionMode::Nonoverlap, 0.0).unwrap();

    assert_eq!(single.der, 0.0);
    assert_eq!(nonoverlap, single);
    assert!(close(overlap.miss, 0.5));
    // all = single and overlap pooled by duration
    assert!(close(
        all.miss_seconds(),
        single.miss_seconds() + overlap.miss_seconds()
    ));
    assert!(close(all.duration, single.duration + overlap.duration));
}

/// Inverted turn rejects the whole set
#[test]
fn test_invalid_interval() {
    let err = IntervalSet::build(vec![Turn::new("A", 0.0, 1.0), Turn::new("B", 5.0, 2.0)]).unwrap_err();
    assert_eq!(err, DerError::InvalidInterval { speaker: "B".into(), start: 5.0, end: 2.0 });
    assert!(err.is_recoverable());
}

/// Unsorted input with same-speaker overlaps scores like the merged form
#[test]
fn test_unsorted_overlapping_input() {
    let messy = set(&[("B", 12.0, 20.0), ("A", 4.0, 10.0), ("A", 0.0, 6.0), ("B", 10.0, 14.0)]);
    let clean = set(&[("A", 0.0, 10.0), ("B", 10.0, 20.0)]);
    let m = compute_der(messy, clean, None, RegionMode::All, 0.0).unwrap();
    assert_eq!(m.der, 0.0);
    assert!(close(m.duration, 20.0));
}
