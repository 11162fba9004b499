//! Minimum-cost assignment
//!
//! `AssignmentSolver` is the seam the correspondence step calls through.
//! `HungarianSolver` is the default: the O(n³) shortest augmenting path
//! form of the Hungarian method with row/column potentials. Rectangular
//! matrices are padded with zero-cost dummy rows/columns; a row matched
//! to a dummy column is left unassigned.

use crate::types::{DerError, DerResult};

/// Row-major `M × N` cost matrix
pub type CostMatrix = Vec<Vec<f64>>;

/// Solver output
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// One entry per row: matched column, or `None` if unmatched
    pub rows: Vec<Option<usize>>,
    /// Summed cost of the matched cells
    pub cost: f64,
}

impl Assignment {
    /// Matched `(row, column)` pairs in row order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, col)| col.map(|j| (i, j)))
    }
}

/// Minimum-cost one-to-one assignment of rows to columns.
///
/// Ties between optimal assignments are implementation-defined.
pub trait AssignmentSolver {
    fn solve(&self, cost: &[Vec<f64>]) -> DerResult<Assignment>;
}

/// Hungarian method with potentials
#[derive(Debug, Default, Clone, Copy)]
pub struct HungarianSolver;

/// Rows must share one width and every cell must be finite
fn check_matrix(cost: &[Vec<f64>]) -> DerResult<usize> {
    let cols = cost.first().map_or(0, Vec::len);
    for (i, row) in cost.iter().enumerate() {
        if row.len() != cols {
            return Err(DerError::SolverFailure(format!(
                "ragged cost matrix: row {} has {} columns, expected {}",
                i,
                row.len(),
                cols
            )));
        }
        if let Some(j) = row.iter().position(|c| !c.is_finite()) {
            return Err(DerError::SolverFailure(format!(
                "non-finite cost at ({}, {})",
                i, j
            )));
        }
    }
    Ok(cols)
}

impl AssignmentSolver for HungarianSolver {
    fn solve(&self, cost: &[Vec<f64>]) -> DerResult<Assignment> {
        let rows = cost.len();
        let cols = check_matrix(cost)?;
        if rows == 0 || cols == 0 {
            return Ok(Assignment {
                rows: vec![None; rows],
                cost: 0.0,
            });
        }

        let n = rows.max(cols);
        let at = |i: usize, j: usize| -> f64 {
            if i < rows && j < cols {
                cost[i][j]
            } else {
                0.0
            }
        };

        // 1-based: index 0 is the virtual source column
        let mut u = vec![0.0_f64; n + 1];
        let mut v = vec![0.0_f64; n + 1];
        // p[j] = row matched to column j (0 = none)
        let mut p = vec![0_usize; n + 1];
        let mut way = vec![0_usize; n + 1];

        for i in 1..=n {
            p[0] = i;
            let mut j0 = 0;
            let mut minv = vec![f64::INFINITY; n + 1];
            let mut used = vec![false; n + 1];

            loop {
                used[j0] = true;
                let i0 = p[j0];
                let mut delta = f64::INFINITY;
                let mut j1 = 0;

                for j in 1..=n {
                    if used[j] {
                        continue;
                    }
                    let reduced = at(i0 - 1, j - 1) - u[i0] - v[j];
                    if reduced < minv[j] {
                        minv[j] = reduced;
                        way[j] = j0;
                    }
                    if minv[j] < delta {
                        delta = minv[j];
                        j1 = j;
                    }
                }

                if j1 == 0 || !delta.is_finite() {
                    return Err(DerError::SolverFailure(format!(
                        "no augmenting path for row {}",
                        i - 1
                    )));
                }

                for j in 0..=n {
                    if used[j] {
                        u[p[j]] += delta;
                        v[j] -= delta;
                    } else {
                        minv[j] -= delta;
                    }
                }

                j0 = j1;
                if p[j0] == 0 {
                    break;
                }
            }

            // augment along the alternating path
            loop {
                let j1 = way[j0];
                p[j0] = p[j1];
                j0 = j1;
                if j0 == 0 {
                    break;
                }
            }
        }

        let mut assigned = vec![None; rows];
        for j in 1..=n {
            let i = p[j];
            if i != 0 && i - 1 < rows && j - 1 < cols {
                assigned[i - 1] = Some(j - 1);
            }
        }
        let total = assigned
            .iter()
            .enumerate()
            .filter_map(|(i, col)| col.map(|j| cost[i][j]))
            .sum();

        Ok(Assignment {
            rows: assigned,
            cost: total,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
