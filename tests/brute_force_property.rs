use hungarian_assign::{maximize, minimize, HungarianSolver, Objective, WeightMatrix};
use proptest::prelude::*;

/// Visit every permutation of 0..n and return the best total under `better`.
fn exhaustive<F>(rows: &[Vec<i64>], better: F) -> i64
where
    F: Fn(i64, i64) -> bool,
{
    fn walk<F: Fn(i64, i64) -> bool>(
        rows: &[Vec<i64>],
        row: usize,
        used: &mut [bool],
        acc: i64,
        best: &mut Option<i64>,
        better: &F,
    ) {
        if row == rows.len() {
            if best.map_or(true, |b| better(acc, b)) {
                *best = Some(acc);
            }
            return;
        }
        for col in 0..rows.len() {
            if used[col] {
                continue;
            }
            used[col] = true;
            walk(rows, row + 1, used, acc + rows[row][col], best, better);
            used[col] = false;
        }
    }

    let mut best = None;
    let mut used = vec![false; rows.len()];
    walk(rows, 0, &mut used, 0, &mut best, &better);
    best.unwrap()
}

fn is_permutation(p: &[usize]) -> bool {
    let mut seen = vec![false; p.len()];
    p.iter().all(|&v| v < seen.len() && !std::mem::replace(&mut seen[v], true))
}

fn square(n: usize, values: &[i64]) -> Vec<Vec<i64>> {
    (0..n)
        .map(|x| (0..n).map(|y| values[(x * n + y) % values.len()]).collect())
        .collect()
}

proptest! {
    #[test]
    fn maximum_matches_exhaustive_search(
        n in 1usize..=6,
        values in prop::collection::vec(0i64..50, 36)
    ) {
        let rows = square(n, &values);
        let assignment = maximize(&rows).unwrap();
        prop_assert!(is_permutation(assignment.task_to_worker()));
        prop_assert!(is_permutation(assignment.worker_to_task()));
        let recomputed: i64 = assignment.pairs().map(|(x, y)| rows[x][y]).sum();
        prop_assert_eq!(assignment.total(), recomputed);
        prop_assert_eq!(assignment.total(), exhaustive(&rows, |a, b| a > b));
    }

    #[test]
    fn minimum_matches_exhaustive_search(
        n in 1usize..=6,
        values in prop::collection::vec(0i64..50, 36)
    ) {
        let rows = square(n, &values);
        let assignment = minimize(&rows).unwrap();
        prop_assert!(is_permutation(assignment.task_to_worker()));
        let recomputed: i64 = assignment.pairs().map(|(x, y)| rows[x][y]).sum();
        prop_assert_eq!(assignment.total(), recomputed);
        prop_assert_eq!(assignment.total(), exhaustive(&rows, |a, b| a < b));
    }

    #[test]
    fn signed_weights_are_handled(
        n in 1usize..=5,
        values in prop::collection::vec(-40i64..40, 25)
    ) {
        let rows = square(n, &values);
        prop_assert_eq!(maximize(&rows).unwrap().total(), exhaustive(&rows, |a, b| a > b));
        prop_assert_eq!(minimize(&rows).unwrap().total(), exhaustive(&rows, |a, b| a < b));
    }

    #[test]
    fn sparse_ties_still_optimal(
        n in 2usize..=6,
        values in prop::collection::vec(0i64..3, 36)
    ) {
        let rows = square(n, &values);
        let assignment = maximize(&rows).unwrap();
        prop_assert_eq!(assignment.total(), exhaustive(&rows, |a, b| a > b));
    }

    #[test]
    fn execute_returns_inverse_of_row_partners(
        n in 1usize..=6,
        values in prop::collection::vec(0i64..100, 36)
    ) {
        let rows = square(n, &values);
        let matrix = WeightMatrix::new(&rows).unwrap();
        let mut solver = HungarianSolver::with_objective(matrix, Objective::Maximize).unwrap();
        let task_to_worker = solver.execute();
        prop_assert_eq!(task_to_worker.len(), n);
        for (task, &worker) in task_to_worker.iter().enumerate() {
            prop_assert_eq!(solver.partner_of_row(worker), Some(task));
            prop_assert_eq!(solver.partner_of_column(task), Some(worker));
        }
    }
}
