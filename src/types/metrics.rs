//! Scoring output: DER metrics and corpus reports

use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use crate::types::ScoringConfig;

/// Original label → shared label
pub type LabelMap = BTreeMap<String, String>;

/// DER breakdown for one scoring call.
///
/// `miss`, `falarm`, `conf` and `der` are rates relative to `duration`,
/// the scored reference speech in speaker-seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Scored reference speech (seconds, counted once per active speaker)
    pub duration: f64,
    /// Missed speech rate
    pub miss: f64,
    /// False alarm rate
    pub falarm: f64,
    /// Speaker confusion rate
    pub conf: f64,
    /// miss + falarm + conf
    pub der: f64,
    /// Missed speech in seconds
    #[serde(default)]
    pub miss_time: f64,
    /// False alarm in seconds
    #[serde(default)]
    pub falarm_time: f64,
    /// Confusion in seconds
    #[serde(default)]
    pub conf_time: f64,
    /// Reference speaker → shared label
    #[serde(default)]
    pub ref_label_map: LabelMap,
    /// Hypothesis speaker → shared label
    #[serde(default)]
    pub hyp_label_map: LabelMap,
}

impl Metrics {
    /// Normalize absolute error durations (seconds) by `duration`.
    /// Zero duration means no reference speech was scored: all rates are
    /// zero, but the absolute times are kept for pooling.
    pub fn from_totals(duration: f64, miss: f64, falarm: f64, conf: f64) -> Self {
        let times = Self {
            miss_time: miss,
            falarm_time: falarm,
            conf_time: conf,
            ..Self::default()
        };
        if duration == 0.0 {
            return times;
        }
        Self {
            duration,
            miss: miss / duration,
            falarm: falarm / duration,
            conf: conf / duration,
            der: (miss + falarm + conf) / duration,
            ..times
        }
    }

    pub fn with_label_maps(mut self, ref_label_map: LabelMap, hyp_label_map: LabelMap) -> Self {
        self.ref_label_map = ref_label_map;
        self.hyp_label_map = hyp_label_map;
        self
    }

    pub fn miss_seconds(&self) -> f64 {
        self.miss_time
    }

    pub fn falarm_seconds(&self) -> f64 {
        self.falarm_time
    }

    pub fn conf_seconds(&self) -> f64 {
        self.conf_time
    }

    /// Format one table row for terminal display (with colors)
    pub fn to_terminal_string(&self, name: &str) -> String {
        let der = format!("{:>7.2}", 100.0 * self.der);
        let der = if self.der < 0.10 {
            der.green()
        } else if self.der < 0.25 {
            der.yellow()
        } else {
            der.red()
        };
        format!(
            "{:<24} {:>10.2} {:>7.2} {:>7.2} {:>7.2} {}",
            name.bold(),
            self.duration,
            100.0 * self.miss,
            100.0 * self.falarm,
            100.0 * self.conf,
            der.bold()
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self, name: &str) -> String {
        format!(
            "{} duration={:.2} miss={:.2} falarm={:.2} conf={:.2} der={:.2}",
            name,
            self.duration,
            100.0 * self.miss,
            100.0 * self.falarm,
            100.0 * self.conf,
            100.0 * self.der
        )
    }

    /// Header matching `to_terminal_string` columns
    pub fn table_header() -> String {
        format!(
            "{:<24} {:>10} {:>7} {:>7} {:>7} {:>7}",
            "Recording", "Dur(s)", "Miss%", "FA%", "Conf%", "DER%"
        )
    }
}

/// Scores for a set of recordings plus the duration-weighted total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusReport {
    pub generated_at: DateTime<Utc>,
    pub config: ScoringConfig,
    pub per_file: BTreeMap<String, Metrics>,
    pub overall: Metrics,
}

impl CorpusReport {
    /// Build a report, pooling absolute error time across recordings
    pub fn new(config: ScoringConfig, per_file: BTreeMap<String, Metrics>) -> Self {
        let (duration, miss, falarm, conf) = per_file.values().fold(
            (0.0, 0.0, 0.0, 0.0),
            |(d, m, f, c), metrics| {
                (
                    d + metrics.duration,
                    m + metrics.miss_seconds(),
                    f + metrics.falarm_seconds(),
                    c + metrics.conf_seconds(),
                )
            },
        );
        Self {
            generated_at: Utc::now(),
            config,
            per_file,
            overall: Metrics::from_totals(duration, miss, falarm, conf),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
