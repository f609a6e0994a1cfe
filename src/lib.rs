//! Hungarian (Kuhn–Munkres) assignment solver
//!
//! This crate solves the square assignment problem: given an n×n matrix of
//! integer weights, pick one task per worker (one column per row) so that
//! the total weight is maximal, or minimal when the weights are costs.
//!
//! ## Core idea
//! 1. Keep a *feasible labeling*: potentials `lx` on rows and `ly` on columns
//!    with `lx[x] + ly[y] >= w[x][y]` everywhere.
//! 2. Search for augmenting paths using only *tight* edges, where the bound
//!    holds with equality, growing an alternating tree from a free row.
//! 3. When the tree stalls, lower row labels and raise column labels by the
//!    smallest slack, which tightens a new edge without breaking the tree.
//!
//! When every row is matched along tight edges, the labeling certifies that
//! the matching is optimal. A solve is O(n³) time; all working arrays are
//! allocated once per solver.
//!
//! ## Quick start
//! ```
//! use hungarian_assign::{maximize, minimize};
//!
//! let weights = [[4, 2, 8], [2, 3, 7], [3, 1, 6]];
//!
//! let best = maximize(&weights).unwrap();
//! assert_eq!(best.total(), 14);
//! assert_eq!(best.worker_to_task(), &[2, 1, 0]);
//!
//! let cheapest = minimize(&weights).unwrap();
//! assert_eq!(cheapest.total(), 10);
//! assert_eq!(cheapest.task_to_worker(), &[1, 0, 2]);
//! ```
//!
//! ## Validation
//! Shapes and weight ranges are checked before any solver state exists:
//! non-square or empty input yields [`Error::InvalidShape`], and ranges whose
//! labels could overflow the weight type yield [`Error::Overflow`]. After
//! construction, solving cannot fail.
//!
//! ## Features
//! - `tracing`: spans around each solve and augmentation, events for label
//!   updates and path flips.
//! - `probe`: builds the `assign_probe` scaling binary.
//! - `heavy`: enables long-running stress tests.

pub mod assignment;
pub mod builder;
pub mod error;
pub mod matrix;
pub mod solver;
mod state;
pub mod traits;
pub mod utils;

pub use crate::assignment::Assignment;
pub use crate::builder::{Objective, SolverBuilder};
pub use crate::error::{Error, Result, ShapeError};
pub use crate::matrix::WeightMatrix;
pub use crate::solver::{Augmentation, HungarianSolver, SolveStats};
pub use crate::traits::Weight;

/// Maximum-weight perfect assignment over a square grid of rows.
pub fn maximize<W: Weight, R: AsRef<[W]>>(rows: &[R]) -> Result<Assignment<W>> {
    solve_rows(rows, Objective::Maximize)
}

/// Minimum-weight perfect assignment over a square grid of rows.
pub fn minimize<W: Weight, R: AsRef<[W]>>(rows: &[R]) -> Result<Assignment<W>> {
    solve_rows(rows, Objective::Minimize)
}

fn solve_rows<W: Weight, R: AsRef<[W]>>(rows: &[R], objective: Objective) -> Result<Assignment<W>> {
    let mut solver = SolverBuilder::from_rows(rows)?.objective(objective).build()?;
    Ok(solver.solve())
}
