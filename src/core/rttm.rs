//! RTTM and UEM readers
//!
//! RTTM: `SPEAKER <file> <chan> <start> <dur> <ortho> <stype> <name> [<conf> <slat>]`
//! UEM:  `<file> <chan> <start> <end>`
//!
//! Blank lines and `#` comments are skipped everywhere. Non-SPEAKER RTTM
//! records are ignored.

use std::fs;
use std::path::Path;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;
use crate::types::{DerError, DerResult, Recordings, Turn};

lazy_static! {
    // SPEAKER record, fields 1..=7 captured (file, chan, start, dur, ortho, stype, name)
    static ref RE_SPEAKER: Regex = Regex::new(
        r"^SPEAKER\s+(\S+)\s+(\S+)\s+(\S+)\s+(\S+)\s+(\S+)\s+(\S+)\s+(\S+)(?:\s+\S+)*$"
    ).unwrap();

    // UEM line: file, chan, start, end
    static ref RE_UEM: Regex = Regex::new(
        r"^(\S+)\s+(\S+)\s+(\S+)\s+(\S+)$"
    ).unwrap();
}

/// Lines worth parsing, with 1-based line numbers
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn parse_time(field: &str, what: &str, line: usize) -> DerResult<f64> {
    field
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
        .ok_or_else(|| DerError::Parse {
            line,
            message: format!("{} '{}' is not a finite number", what, field),
        })
}

/// Parse RTTM text into speaker turns per recording
pub fn parse_rttm(text: &str) -> DerResult<Recordings> {
    let mut recordings = Recordings::new();

    for (line_no, line) in content_lines(text) {
        if line.split_whitespace().next() != Some("SPEAKER") {
            continue;
        }
        let caps = RE_SPEAKER.captures(line).ok_or_else(|| DerError::Parse {
            line: line_no,
            message: "SPEAKER record needs at least 8 fields".to_string(),
        })?;

        let start = parse_time(&caps[3], "onset", line_no)?;
        let duration = parse_time(&caps[4], "duration", line_no)?;
        recordings
            .entry(caps[1].to_string())
            .or_default()
            .push(Turn::new(&caps[7], start, start + duration));
    }

    debug!(recordings = recordings.len(), "parsed rttm");
    Ok(recordings)
}

/// Parse UEM text into mask turns per recording. Each turn is labelled
/// with its recording id.
pub fn parse_uem(text: &str) -> DerResult<Recordings> {
    let mut recordings = Recordings::new();

    for (line_no, line) in content_lines(text) {
        let caps = RE_UEM.captures(line).ok_or_else(|| DerError::Parse {
            line: line_no,
            message: "UEM line needs exactly 4 fields".to_string(),
        })?;

        let file = &caps[1];
        let start = parse_time(&caps[3], "start", line_no)?;
        let end = parse_time(&caps[4], "end", line_no)?;
        recordings
            .entry(file.to_string())
            .or_default()
            .push(Turn::new(file, start, end));
    }

    debug!(recordings = recordings.len(), "parsed uem");
    Ok(recordings)
}

fn read(path: &Path) -> DerResult<String> {
    fs::read_to_string(path).map_err(|e| DerError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Read and parse an RTTM file
pub fn load_rttm(path: impl AsRef<Path>) -> DerResult<Recordings> {
    parse_rttm(&read(path.as_ref())?)
}

/// Read and parse a UEM file
pub fn load_uem(path: impl AsRef<Path>) -> DerResult<Recordings> {
    parse_uem(&read(path.as_ref())?)
}

// =============================================================================
// TESTS
// =============================================================================
