//! Index-addressed solver state: labels, matching, and the alternating tree.
//!
//! Every vector here is sized `n` once at construction. Between augmentation
//! attempts the tree is cleared in place, never reallocated.

use crate::matrix::WeightMatrix;
use crate::traits::Weight;

/// Feasible vertex labeling `(lx, ly)`.
///
/// Invariant: `lx[x] + ly[y] >= w[x][y]` for every pair.
#[derive(Debug, Clone)]
pub struct Labels<W> {
    pub(crate) lx: Vec<W>,
    pub(crate) ly: Vec<W>,
}

impl<W: Weight> Labels<W> {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            lx: vec![W::ZERO; n],
            ly: vec![W::ZERO; n],
        }
    }

    /// Row labels to row maxima, column labels to zero.
    pub(crate) fn seed(&mut self, weights: &WeightMatrix<W>) {
        for (lx, row) in self.lx.iter_mut().zip(weights.rows()) {
            *lx = row.iter().copied().max().unwrap_or(W::ZERO);
        }
        self.ly.fill(W::ZERO);
    }

    /// Label gap `lx[x] + ly[y] - w[x][y]`; zero exactly on tight edges.
    #[inline]
    pub(crate) fn gap(&self, weights: &WeightMatrix<W>, x: usize, y: usize) -> W {
        self.lx[x] + self.ly[y] - weights.get(x, y)
    }

    #[inline]
    pub(crate) fn is_tight(&self, weights: &WeightMatrix<W>, x: usize, y: usize) -> bool {
        weights.get(x, y) == self.lx[x] + self.ly[y]
    }

    /// Lower tree rows and raise tree columns by `delta`.
    ///
    /// Edges inside the tree keep their gap; edges from S to columns outside
    /// T lose `delta`, which the caller mirrors in the slack array.
    pub(crate) fn shift(&mut self, tree: &AlternatingTree<W>, delta: W) {
        for (lx, _) in self.lx.iter_mut().zip(&tree.in_s).filter(|(_, &s)| s) {
            *lx -= delta;
        }
        for (ly, _) in self.ly.iter_mut().zip(&tree.in_t).filter(|(_, &t)| t) {
            *ly += delta;
        }
    }

    /// First pair breaking feasibility, if any.
    pub(crate) fn violation(&self, weights: &WeightMatrix<W>) -> Option<(usize, usize)> {
        let n = weights.n();
        (0..n)
            .flat_map(|x| (0..n).map(move |y| (x, y)))
            .find(|&(x, y)| self.lx[x] + self.ly[y] < weights.get(x, y))
    }

    /// `Σlx + Σly`.
    pub(crate) fn dual_sum(&self) -> W {
        self.lx.iter().chain(&self.ly).copied().sum()
    }
}

/// Partial matching between rows and columns, kept symmetric.
#[derive(Debug, Clone)]
pub struct Matching {
    pub(crate) xy: Vec<Option<usize>>,
    pub(crate) yx: Vec<Option<usize>>,
    size: usize,
}

impl Matching {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            xy: vec![None; n],
            yx: vec![None; n],
            size: 0,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.xy.fill(None);
        self.yx.fill(None);
        self.size = 0;
    }

    /// Number of matched rows.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.size
    }

    pub(crate) fn first_free_row(&self) -> Option<usize> {
        self.xy.iter().position(Option::is_none)
    }

    /// Pair `x` with `y` and return the column `x` held before.
    ///
    /// The displaced column's back-pointer is left stale; path flipping
    /// overwrites it on the next step.
    #[inline]
    pub(crate) fn pair(&mut self, x: usize, y: usize) -> Option<usize> {
        self.yx[y] = Some(x);
        self.xy[x].replace(y)
    }

    pub(crate) fn grow(&mut self) {
        self.size += 1;
    }

    /// `xy[x] == Some(y)` exactly when `yx[y] == Some(x)`.
    pub(crate) fn is_consistent(&self) -> bool {
        let forward = self
            .xy
            .iter()
            .enumerate()
            .all(|(x, y)| y.map_or(true, |y| self.yx[y] == Some(x)));
        let backward = self
            .yx
            .iter()
            .enumerate()
            .all(|(y, x)| x.map_or(true, |x| self.xy[x] == Some(y)));
        let counted = self.xy.iter().filter(|y| y.is_some()).count();
        forward && backward && counted == self.size
    }
}

/// Alternating tree rooted at one free row, with per-column slack.
///
/// `slack[y]` is the minimum gap from any row in S to column `y`, and
/// `slackx[y]` a row achieving it.
#[derive(Debug, Clone)]
pub struct AlternatingTree<W> {
    pub(crate) in_s: Vec<bool>,
    pub(crate) in_t: Vec<bool>,
    pub(crate) prev: Vec<Option<usize>>,
    pub(crate) slack: Vec<W>,
    pub(crate) slackx: Vec<usize>,
    queue: Vec<usize>,
    head: usize,
}

impl<W: Weight> AlternatingTree<W> {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            in_s: vec![false; n],
            in_t: vec![false; n],
            prev: vec![None; n],
            slack: vec![W::ZERO; n],
            slackx: vec![0; n],
            queue: Vec::with_capacity(n),
            head: 0,
        }
    }

    /// Drop the previous tree and root a new one at `root`.
    pub(crate) fn plant(&mut self, root: usize, labels: &Labels<W>, weights: &WeightMatrix<W>) {
        self.in_s.fill(false);
        self.in_t.fill(false);
        self.prev.fill(None);
        self.reset_queue();

        self.in_s[root] = true;
        self.queue.push(root);
        for y in 0..self.slack.len() {
            self.slack[y] = labels.gap(weights, root, y);
            self.slackx[y] = root;
        }
    }

    /// Admit row `x` with tree parent `parent` and tighten slacks through it.
    pub(crate) fn add_row(
        &mut self,
        x: usize,
        parent: usize,
        labels: &Labels<W>,
        weights: &WeightMatrix<W>,
    ) {
        self.in_s[x] = true;
        self.prev[x] = Some(parent);
        self.queue.push(x);
        for y in 0..self.slack.len() {
            let gap = labels.gap(weights, x, y);
            if gap < self.slack[y] {
                self.slack[y] = gap;
                self.slackx[y] = x;
            }
        }
    }

    /// Smallest slack over columns outside T.
    pub(crate) fn min_outside_slack(&self) -> Option<W> {
        self.slack
            .iter()
            .zip(&self.in_t)
            .filter(|(_, &t)| !t)
            .map(|(&s, _)| s)
            .min()
    }

    /// Subtract `delta` from every slack outside T.
    pub(crate) fn lower_outside_slack(&mut self, delta: W) {
        for (s, _) in self.slack.iter_mut().zip(&self.in_t).filter(|(_, &t)| !t) {
            *s -= delta;
        }
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<usize> {
        let x = self.queue.get(self.head).copied()?;
        self.head += 1;
        Some(x)
    }

    pub(crate) fn reset_queue(&mut self) {
        self.queue.clear();
        self.head = 0;
    }

    /// Rows currently in S.
    pub(crate) fn rows_in_tree(&self) -> usize {
        self.in_s.iter().filter(|&&s| s).count()
    }

    /// Rows from `x` back to the root.
    pub(crate) fn path_len(&self, x: usize) -> usize {
        std::iter::successors(Some(x), |&r| self.prev[r]).count()
    }
}
