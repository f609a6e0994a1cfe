use crate::error::Result;
use crate::matrix::WeightMatrix;
use crate::solver::HungarianSolver;
use crate::traits::Weight;

/// Direction of optimisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Objective {
    /// Largest total weight (benefits).
    #[default]
    Maximize,
    /// Smallest total weight (costs).
    Minimize,
}

pub struct SolverBuilder<W: Weight> {
    weights: WeightMatrix<W>,
    objective: Objective,
}

impl<W: Weight> SolverBuilder<W> {
    pub fn new(weights: WeightMatrix<W>) -> Self {
        Self {
            weights,
            objective: Objective::default(),
        }
    }

    /// Copy `rows` into a matrix first.
    pub fn from_rows<R: AsRef<[W]>>(rows: &[R]) -> Result<Self> {
        WeightMatrix::new(rows).map(Self::new)
    }

    pub fn objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    pub fn maximize(self) -> Self {
        self.objective(Objective::Maximize)
    }

    pub fn minimize(self) -> Self {
        self.objective(Objective::Minimize)
    }

    pub fn build(self) -> Result<HungarianSolver<W>> {
        HungarianSolver::with_objective(self.weights, self.objective)
    }
}
