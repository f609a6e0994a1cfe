//! Owned, validated square weight matrix.

use std::ops::Index;

use crate::error::{Result, ShapeError};
use crate::traits::Weight;

/// An n×n grid of weights stored row-major.
///
/// Construction copies the caller's data, so later changes to the source do
/// not affect a solver built from this matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightMatrix<W> {
    n: usize,
    data: Vec<W>,
}

impl<W: Weight> WeightMatrix<W> {
    /// Copy a square grid of rows.
    ///
    /// # Errors
    /// [`ShapeError::Empty`] for zero rows, [`ShapeError::NotSquare`] for the
    /// first row whose length differs from the row count.
    pub fn new<R: AsRef<[W]>>(rows: &[R]) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(ShapeError::Empty.into());
        }
        let mut data = Vec::with_capacity(n * n);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != n {
                return Err(ShapeError::NotSquare {
                    row,
                    len: values.len(),
                    expected: n,
                }
                .into());
            }
            data.extend_from_slice(values);
        }
        Ok(Self { n, data })
    }

    /// Take ownership of a row-major buffer of `n * n` weights.
    pub fn from_flat(n: usize, data: Vec<W>) -> Result<Self> {
        if n == 0 {
            return Err(ShapeError::Empty.into());
        }
        if n.checked_mul(n) != Some(data.len()) {
            return Err(ShapeError::FlatLength { len: data.len(), n }.into());
        }
        Ok(Self { n, data })
    }

    /// Build an n×n matrix from a function of `(row, column)`.
    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> W) -> Result<Self> {
        if n == 0 {
            return Err(ShapeError::Empty.into());
        }
        let mut data = Vec::with_capacity(n * n);
        for x in 0..n {
            for y in 0..n {
                data.push(f(x, y));
            }
        }
        Ok(Self { n, data })
    }

    /// Dimension n.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Weight of assigning row `x` to column `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> W {
        self.data[x * self.n + y]
    }

    /// All weights of row `x`.
    #[inline]
    pub fn row(&self, x: usize) -> &[W] {
        &self.data[x * self.n..(x + 1) * self.n]
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[W]> + '_ {
        self.data.chunks_exact(self.n)
    }

    /// Smallest and largest weight.
    pub fn bounds(&self) -> (W, W) {
        let first = self.data[0];
        self.data
            .iter()
            .fold((first, first), |(lo, hi), &w| (lo.min(w), hi.max(w)))
    }

    /// Apply `f` to every weight, keeping the shape.
    pub fn map(&self, f: impl Fn(W) -> W) -> Self {
        Self {
            n: self.n,
            data: self.data.iter().map(|&w| f(w)).collect(),
        }
    }

    /// Sum of the weights picked by `worker_to_task`.
    pub fn total_of(&self, worker_to_task: &[usize]) -> W {
        worker_to_task
            .iter()
            .enumerate()
            .map(|(x, &y)| self.get(x, y))
            .sum()
    }

    /// Copy back out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<W>> {
        self.rows().map(<[W]>::to_vec).collect()
    }
}

impl<W: Weight> Index<(usize, usize)> for WeightMatrix<W> {
    type Output = W;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &W {
        &self.data[x * self.n + y]
    }
}

impl<W: Weight> TryFrom<Vec<Vec<W>>> for WeightMatrix<W> {
    type Error = crate::error::Error;

    fn try_from(rows: Vec<Vec<W>>) -> Result<Self> {
        Self::new(&rows)
    }
}
