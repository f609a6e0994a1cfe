//! Solved assignments.

use std::fmt;

/// A perfect matching of workers (rows) to tasks (columns) with its weight.
///
/// `total` is expressed in the caller's original weights, whatever the
/// objective was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<W> {
    task_to_worker: Vec<usize>,
    worker_to_task: Vec<usize>,
    total: W,
}

impl<W: Copy> Assignment<W> {
    pub(crate) fn new(worker_to_task: Vec<usize>, total: W) -> Self {
        let mut task_to_worker = vec![0; worker_to_task.len()];
        for (worker, &task) in worker_to_task.iter().enumerate() {
            task_to_worker[task] = worker;
        }
        Self {
            task_to_worker,
            worker_to_task,
            total,
        }
    }

    /// Number of workers (and tasks).
    pub fn len(&self) -> usize {
        self.worker_to_task.len()
    }

    /// Always false; assignments cover at least one worker.
    pub fn is_empty(&self) -> bool {
        self.worker_to_task.is_empty()
    }

    /// Index = task, value = assigned worker.
    pub fn task_to_worker(&self) -> &[usize] {
        &self.task_to_worker
    }

    /// Index = worker, value = assigned task.
    pub fn worker_to_task(&self) -> &[usize] {
        &self.worker_to_task
    }

    pub fn worker_for(&self, task: usize) -> usize {
        self.task_to_worker[task]
    }

    pub fn task_for(&self, worker: usize) -> usize {
        self.worker_to_task[worker]
    }

    /// Sum of the chosen weights.
    pub fn total(&self) -> W {
        self.total
    }

    /// `(worker, task)` pairs ordered by worker.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.worker_to_task.iter().copied().enumerate()
    }

    /// Consume into the task→worker permutation.
    pub fn into_task_to_worker(self) -> Vec<usize> {
        self.task_to_worker
    }
}

impl<W: fmt::Display + Copy> fmt::Display for Assignment<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total weight: {}", self.total)?;
        for (worker, task) in self.pairs() {
            writeln!(f, "  worker {worker} -> task {task}")?;
        }
        Ok(())
    }
}
