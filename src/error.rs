//! Error types for hungarian-assign.
//!
//! All failures are detected at the boundary, before any solver state is
//! built. Once a [`HungarianSolver`](crate::HungarianSolver) exists, solving
//! cannot fail.

use thiserror::Error;

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating an assignment instance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The weight grid is not a non-empty square.
    #[error("invalid matrix shape: {0}")]
    InvalidShape(#[from] ShapeError),

    /// Labels or totals for this weight range would not fit in the weight type.
    #[error(
        "weights in [{min}, {max}] over {n} rows overflow {ty}; \
         max(|min|, |max|) + (n + 1) * (max - min) must fit"
    )]
    Overflow {
        /// Matrix dimension
        n: usize,
        /// Smallest weight in the range that was checked
        min: i128,
        /// Largest weight in the range that was checked
        max: i128,
        /// Name of the weight type
        ty: &'static str,
    },
}

/// Ways a weight grid can fail to be a square matrix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Zero rows.
    #[error("matrix has no rows")]
    Empty,

    /// A row whose length differs from the row count.
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        /// Offending row index
        row: usize,
        /// Its length
        len: usize,
        /// Number of rows in the matrix
        expected: usize,
    },

    /// Flat storage whose length is not `n * n`.
    #[error("flat buffer holds {len} weights, expected {n} x {n}")]
    FlatLength {
        /// Buffer length
        len: usize,
        /// Requested dimension
        n: usize,
    },
}
