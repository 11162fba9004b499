//! Core types for DER scoring

mod error;
mod turn;
mod event;
mod region;
mod metrics;
mod config;

pub use error::{DerError, DerResult};
pub use turn::{Recordings, Turn};
pub use event::{Event, EventKind, Namespace};
pub use region::{Region, RegionMode};
pub use metrics::{Metrics, LabelMap, CorpusReport};
pub use config::ScoringConfig;
