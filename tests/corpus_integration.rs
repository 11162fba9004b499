//! Integration tests for corpus scoring
//!
//! Tests the full path: RTTM/UEM text → parse → score_corpus → CorpusReport

use std::fs;
use spyder::core::{load_rttm, load_uem, parse_rttm, parse_uem};
use spyder::types::{RegionMode, ScoringConfig};
use spyder::score_corpus;

const REFERENCE: &str = "\
SPEAKER meeting1 1 0.00 10.00 <NA> <NA> alice <NA> <NA>
SPEAKER meeting1 1 10.00 10.00 <NA> <NA> bob <NA> <NA>
SPEAKER meeting2 1 0.00 5.00 <NA> <NA> carol <NA> <NA>
SPEAKER meeting2 1 5.00 5.00 <NA> <NA> dave <NA> <NA>
";

const HYPOTHESIS: &str = "\
SPEAKER meeting1 1 0.00 10.00 <NA> <NA> spk0 <NA> <NA>
SPEAKER meeting1 1 10.00 10.00 <NA> <NA> spk1 <NA> <NA>
SPEAKER meeting2 1 0.00 10.00 <NA> <NA> spk0 <NA> <NA>
SPEAKER stray 1 0.00 3.00 <NA> <NA> spk9 <NA> <NA>
";

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Per-file and pooled scores
#[test]
fn test_corpus_report() {
    let reference = parse_rttm(REFERENCE).unwrap();
    let hypothesis = parse_rttm(HYPOTHESIS).unwrap();
    let report = score_corpus(&reference, &hypothesis, None, &ScoringConfig::default()).unwrap();

    assert_eq!(report.per_file.keys().collect::<Vec<_>>(), vec!["meeting1", "meeting2"]);
    assert_eq!(report.per_file["meeting1"].der, 0.0);
    // spk0 covers carol and dave: half the speech is confused
    assert!(close(report.per_file["meeting2"].conf, 0.5));
    // 5s confusion over 30s of reference speech
    assert!(close(report.overall.der, 5.0 / 30.0));
    assert!(close(report.overall.duration, 30.0));
    assert!(report.overall.ref_label_map.is_empty());
}

/// UEM limits scoring per recording
#[test]
fn test_corpus_with_uem() {
    let reference = parse_rttm(REFERENCE).unwrap();
    let hypothesis = parse_rttm(HYPOTHESIS).unwrap();
    let uem = parse_uem("meeting1 1 0.0 20.0\nmeeting2 1 0.0 5.0\n").unwrap();
    let report = score_corpus(&reference, &hypothesis, Some(&uem), &ScoringConfig::default()).unwrap();

    // dave's half of meeting2 lies outside the UEM
    assert_eq!(report.per_file["meeting2"].der, 0.0);
    assert!(close(report.per_file["meeting2"].duration, 5.0));
    assert_eq!(report.overall.der, 0.0);
}

/// False alarm in a recording with no scored reference speech still counts overall
#[test]
fn test_overall_keeps_false_alarm_only_recording() {
    let reference = parse_rttm(
        "SPEAKER a 1 0 10 <NA> <NA> A <NA> <NA>\n\
         SPEAKER b 1 20 10 <NA> <NA> B <NA> <NA>\n",
    )
    .unwrap();
    let hypothesis = parse_rttm(
        "SPEAKER a 1 0 10 <NA> <NA> x <NA> <NA>\n\
         SPEAKER b 1 0 10 <NA> <NA> y <NA> <NA>\n",
    )
    .unwrap();
    let uem = parse_uem("a 1 0 10\nb 1 0 10\n").unwrap();
    let report = score_corpus(&reference, &hypothesis, Some(&uem), &ScoringConfig::default()).unwrap();

    let b = &report.per_file["b"];
    assert_eq!(b.duration, 0.0);
    assert_eq!(b.der, 0.0);
    assert!(close(b.falarm_seconds(), 10.0));

    // 10s of false alarm over the 10s of reference speech in `a`
    assert!(close(report.overall.duration, 10.0));
    assert!(close(report.overall.falarm, 1.0));
    assert!(close(report.overall.der, 1.0));
}

/// Collar and region mode come from the config
#[test]
fn test_corpus_config_applied() {
    let reference = parse_rttm(REFERENCE).unwrap();
    let hypothesis = parse_rttm(HYPOTHESIS).unwrap();
    let config = ScoringConfig::new(RegionMode::Overlap, 0.0);
    let report = score_corpus(&reference, &hypothesis, None, &config).unwrap();

    // no overlapping reference speech anywhere
    assert_eq!(report.overall.duration, 0.0);
    assert_eq!(report.overall.der, 0.0);
    assert_eq!(report.config.regions, RegionMode::Overlap);
}

/// Report survives a JSON round trip through serde
#[test]
fn test_report_json_shape() {
    let reference = parse_rttm(REFERENCE).unwrap();
    let report = score_corpus(&reference, &reference, None, &ScoringConfig::default()).unwrap();
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();

    assert!(json["generated_at"].is_string());
    assert_eq!(json["config"]["regions"], "all");
    assert_eq!(json["per_file"]["meeting1"]["der"], 0.0);
    assert!(json["overall"]["duration"].is_number());
}

/// Files on disk go through the same parsers
#[test]
fn test_load_from_disk() {
    let dir = std::env::temp_dir().join(format!("spyder-corpus-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let ref_path = dir.join("ref.rttm");
    let uem_path = dir.join("all.uem");
    fs::write(&ref_path, REFERENCE).unwrap();
    fs::write(&uem_path, "meeting1 1 0 20\n").unwrap();

    let reference = load_rttm(&ref_path).unwrap();
    let uem = load_uem(&uem_path).unwrap();
    assert_eq!(reference.len(), 2);
    assert_eq!(uem["meeting1"][0].speaker, "meeting1");

    fs::remove_dir_all(&dir).unwrap();
}

/// Config file with partial fields
#[test]
fn test_config_file() {
    let dir = std::env::temp_dir().join(format!("spyder-config-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("scoring.json");
    fs::write(&path, r#"{"collar": 0.25}"#).unwrap();

    let config = ScoringConfig::from_file(&path).unwrap();
    assert_eq!(config.collar, 0.25);
    assert_eq!(config.regions, RegionMode::All);

    fs::write(&path, r#"{"regions": "sometimes"}"#).unwrap();
    assert_eq!(ScoringConfig::from_file(&path).unwrap_err().code(), "E008_CONFIG");

    fs::remove_dir_all(&dir).unwrap();
}

/// A malformed line reports its position
#[test]
fn test_parse_error_line_number() {
    let text = "SPEAKER a 1 0 1 <NA> <NA> x <NA> <NA>\n\nSPEAKER a 1 oops\n";
    let err = parse_rttm(text).unwrap_err();
    assert_eq!(err.code(), "E006_PARSE");
    assert!(err.to_string().starts_with("line 3:"));
}
