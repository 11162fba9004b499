//! Core modules for DER scoring

pub mod interval_set;
pub mod sweep;
pub mod assignment;
pub mod correspondence;
pub mod collar;
pub mod aggregate;
pub mod der;
pub mod corpus;
pub mod rttm;
pub mod api;

pub use interval_set::IntervalSet;
pub use sweep::{evaluation_regions, sweep_mask_spans, sweep_regions, EventStream};
pub use assignment::{Assignment, AssignmentSolver, CostMatrix, HungarianSolver};
pub use correspondence::{build_cost_matrix, label_maps, map_labels, resolve, Correspondence};
pub use collar::{apply_collar, check_collar, collar_adjusted_regions};
pub use aggregate::{accumulate, aggregate, ErrorTotals};
pub use der::{compute_der, compute_der_with_solver};
pub use corpus::score_corpus;
pub use rttm::{load_rttm, load_uem, parse_rttm, parse_uem};
pub use api::{create_router, run_server};
