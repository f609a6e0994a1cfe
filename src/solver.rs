//! Kuhn–Munkres solver over a feasible labeling.
//!
//! The solver alternates between two phases until every row is matched:
//! 1. Grow an alternating tree from a free row along tight edges
//!    (`lx[x] + ly[y] == w[x][y]`), breadth first.
//! 2. When the tree cannot grow, shift labels by the minimum slack so that
//!    at least one new edge out of the tree becomes tight.
//!
//! Reaching a free column closes an augmenting path, which is flipped to
//! grow the matching by one. Each of the n augmentations costs O(n²), so a
//! full solve is O(n³) time and O(n) working memory beyond the matrix.

use crate::assignment::Assignment;
use crate::builder::Objective;
use crate::error::Result;
use crate::matrix::WeightMatrix;
use crate::state::{AlternatingTree, Labels, Matching};
use crate::traits::Weight;
use crate::utils::check_headroom;

/// Counters for the most recent solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Augmenting paths flipped.
    pub augmentations: usize,
    /// Label updates performed across all augmentations.
    pub label_updates: usize,
    /// Rows admitted to alternating trees, roots included.
    pub rows_admitted: usize,
}

/// Outcome of one augmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Augmentation {
    /// Free row the tree was rooted at.
    pub root: usize,
    /// Free column that closed the path.
    pub column: usize,
    /// Rows on the flipped path.
    pub path_len: usize,
    /// Label updates this augmentation needed.
    pub label_updates: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchState {
    Searching,
    Stuck,
    Found { row: usize, column: usize },
}

/// Hungarian solver for one square instance.
///
/// Typical usage:
/// ```
/// use hungarian_assign::{HungarianSolver, WeightMatrix};
///
/// let weights = WeightMatrix::new(&[[7, 3], [6, 1]]).unwrap();
/// let mut solver = HungarianSolver::new(weights).unwrap();
/// let assignment = solver.solve();
/// assert_eq!(assignment.total(), 9);
/// assert_eq!(assignment.worker_to_task(), &[1, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct HungarianSolver<W: Weight> {
    /// Weights in maximisation form.
    weights: WeightMatrix<W>,
    objective: Objective,
    /// Minimisation stores `shift - w`; zero otherwise.
    shift: W,
    labels: Labels<W>,
    matching: Matching,
    tree: AlternatingTree<W>,
    seeded: bool,
    stats: SolveStats,
}

impl<W: Weight> HungarianSolver<W> {
    /// Maximise total weight over `weights`.
    ///
    /// # Errors
    /// [`Error::Overflow`](crate::Error::Overflow) when the weight range is
    /// too wide for `W` at this size.
    pub fn new(weights: WeightMatrix<W>) -> Result<Self> {
        Self::with_objective(weights, Objective::Maximize)
    }

    /// Copy `rows` and maximise over them.
    pub fn from_rows<R: AsRef<[W]>>(rows: &[R]) -> Result<Self> {
        Self::new(WeightMatrix::new(rows)?)
    }

    pub fn with_objective(weights: WeightMatrix<W>, objective: Objective) -> Result<Self> {
        let n = weights.n();
        let (min, max) = weights.bounds();
        check_headroom(n, min, max)?;

        let (weights, shift) = match objective {
            Objective::Maximize => (weights, W::ZERO),
            Objective::Minimize => {
                let flipped = weights.map(|w| max - w);
                check_headroom(n, W::ZERO, max - min)?;
                (flipped, max)
            }
        };

        Ok(Self {
            labels: Labels::new(n),
            matching: Matching::new(n),
            tree: AlternatingTree::new(n),
            weights,
            objective,
            shift,
            seeded: false,
            stats: SolveStats::default(),
        })
    }

    /// Dimension n.
    pub fn n(&self) -> usize {
        self.weights.n()
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Weight of `(x, y)` as the caller supplied it.
    pub fn weight(&self, x: usize, y: usize) -> W {
        match self.objective {
            Objective::Maximize => self.weights.get(x, y),
            Objective::Minimize => self.shift - self.weights.get(x, y),
        }
    }

    /// The matrix the labels are feasible for (flipped when minimising).
    pub fn working_weights(&self) -> &WeightMatrix<W> {
        &self.weights
    }

    /// Solve and return the task→worker permutation: entry `j` is the row
    /// assigned to column `j`.
    pub fn execute(&mut self) -> Vec<usize> {
        self.solve().into_task_to_worker()
    }

    /// Solve from scratch and return the optimal assignment.
    ///
    /// Safe to call repeatedly; each call resets labels and matching.
    pub fn solve(&mut self) -> Assignment<W> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("hungarian_solve", n = self.n());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        self.begin();
        for _ in 0..self.n() {
            let step = self.augment();
            debug_assert!(step.is_some(), "augmentation found no free row");
        }

        match self.assignment() {
            Some(assignment) => assignment,
            None => unreachable!("every augmentation matches one more row"),
        }
    }

    /// Seed labels and clear the matching.
    pub fn begin(&mut self) {
        self.labels.seed(&self.weights);
        self.matching.clear();
        self.stats = SolveStats::default();
        self.seeded = true;
    }

    /// Match one more row along an augmenting path.
    ///
    /// Returns `None` once the matching is perfect. Calls [`begin`](Self::begin)
    /// first if the labels were never seeded.
    pub fn augment(&mut self) -> Option<Augmentation> {
        if !self.seeded {
            self.begin();
        }
        let root = self.matching.first_free_row()?;

        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("augment", root, matched = self.matching.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        debug_assert!(
            self.feasibility_violation().is_none(),
            "labeling infeasible before augmentation"
        );

        self.tree.plant(root, &self.labels, &self.weights);
        let updates_before = self.stats.label_updates;

        let mut state = SearchState::Searching;
        let (row, column) = loop {
            state = match state {
                SearchState::Searching => self.grow_tree(),
                SearchState::Stuck => {
                    self.update_labels();
                    self.scan_tight_columns()
                }
                SearchState::Found { row, column } => break (row, column),
            };
        };

        let path_len = self.tree.path_len(row);
        self.stats.rows_admitted += self.tree.rows_in_tree();
        self.flip_path(row, column);
        self.matching.grow();
        self.stats.augmentations += 1;

        #[cfg(feature = "tracing")]
        tracing::trace!(row, column, path_len, "augmenting path flipped");

        debug_assert!(self.matching.is_consistent(), "matching lost symmetry");

        Some(Augmentation {
            root,
            column,
            path_len,
            label_updates: self.stats.label_updates - updates_before,
        })
    }

    /// Breadth-first growth along tight edges from queued rows.
    fn grow_tree(&mut self) -> SearchState {
        let n = self.n();
        while let Some(x) = self.tree.pop() {
            for y in 0..n {
                if self.tree.in_t[y] || !self.labels.is_tight(&self.weights, x, y) {
                    continue;
                }
                match self.matching.yx[y] {
                    None => return SearchState::Found { row: x, column: y },
                    Some(z) => {
                        self.tree.in_t[y] = true;
                        self.tree.add_row(z, x, &self.labels, &self.weights);
                    }
                }
            }
        }
        SearchState::Stuck
    }

    /// Shift labels by the smallest slack outside T.
    fn update_labels(&mut self) {
        // T never covers every column while the root is still free.
        let delta = self.tree.min_outside_slack().unwrap_or(W::ZERO);
        self.labels.shift(&self.tree, delta);
        self.tree.lower_outside_slack(delta);
        self.stats.label_updates += 1;

        #[cfg(feature = "tracing")]
        tracing::trace!(delta = ?delta, tree_rows = self.tree.rows_in_tree(), "labels tightened");

        debug_assert!(
            self.feasibility_violation().is_none(),
            "label update broke feasibility"
        );
    }

    /// Extend the tree through columns whose slack just reached zero.
    fn scan_tight_columns(&mut self) -> SearchState {
        self.tree.reset_queue();
        for y in 0..self.n() {
            if self.tree.in_t[y] || self.tree.slack[y] != W::ZERO {
                continue;
            }
            let parent = self.tree.slackx[y];
            match self.matching.yx[y] {
                None => return SearchState::Found { row: parent, column: y },
                Some(z) => {
                    self.tree.in_t[y] = true;
                    if !self.tree.in_s[z] {
                        self.tree.add_row(z, parent, &self.labels, &self.weights);
                    }
                }
            }
        }
        SearchState::Searching
    }

    /// Re-pair rows from `row` back to the root, shifting each onto the
    /// column its child vacated.
    fn flip_path(&mut self, row: usize, column: usize) {
        let (mut x, mut y) = (row, column);
        loop {
            let displaced = self.matching.pair(x, y);
            match (self.tree.prev[x], displaced) {
                (Some(parent), Some(next)) => {
                    x = parent;
                    y = next;
                }
                _ => break,
            }
        }
    }

    /// The finished assignment, or `None` while rows are still free.
    pub fn assignment(&self) -> Option<Assignment<W>> {
        let worker_to_task = self.matching.xy.iter().copied().collect::<Option<Vec<_>>>()?;
        let total = worker_to_task
            .iter()
            .enumerate()
            .map(|(x, &y)| self.weight(x, y))
            .sum();
        Some(Assignment::new(worker_to_task, total))
    }

    /// Rows matched so far.
    pub fn matched(&self) -> usize {
        self.matching.len()
    }

    pub fn is_complete(&self) -> bool {
        self.matching.len() == self.n()
    }

    pub fn row_labels(&self) -> &[W] {
        &self.labels.lx
    }

    pub fn column_labels(&self) -> &[W] {
        &self.labels.ly
    }

    pub fn partner_of_row(&self, x: usize) -> Option<usize> {
        self.matching.xy[x]
    }

    pub fn partner_of_column(&self, y: usize) -> Option<usize> {
        self.matching.yx[y]
    }

    /// First `(x, y)` with `lx[x] + ly[y] < w[x][y]` in working weights.
    pub fn feasibility_violation(&self) -> Option<(usize, usize)> {
        self.labels.violation(&self.weights)
    }

    /// Whether row and column partner arrays mirror each other.
    pub fn matching_is_consistent(&self) -> bool {
        self.matching.is_consistent()
    }

    /// `Σlx + Σly`, an upper bound on any matching's working weight.
    pub fn dual_objective(&self) -> W {
        self.labels.dual_sum()
    }

    /// Whether the dual objective equals the working weight of a perfect
    /// matching, which proves that matching optimal.
    pub fn certificate_holds(&self) -> bool {
        if !self.is_complete() {
            return false;
        }
        let primal: W = self
            .matching
            .xy
            .iter()
            .enumerate()
            .filter_map(|(x, y)| y.map(|y| self.weights.get(x, y)))
            .sum();
        primal == self.dual_objective()
    }

    pub fn stats(&self) -> SolveStats {
        self.stats
    }
}
