use hungarian_assign::{
    maximize, minimize, Error, HungarianSolver, Objective, ShapeError, SolverBuilder,
    WeightMatrix,
};

fn all_permutations(n: usize) -> Vec<Vec<usize>> {
    if n == 0 {
        return vec![Vec::new()];
    }
    let mut out = Vec::new();
    for p in all_permutations(n - 1) {
        for slot in 0..=p.len() {
            let mut q = p.clone();
            q.insert(slot, n - 1);
            out.push(q);
        }
    }
    out
}

/// Best total and every worker→task permutation achieving it.
fn ground_truth(rows: &[[i32; 3]; 3]) -> (i32, Vec<Vec<usize>>) {
    let scored: Vec<(i32, Vec<usize>)> = all_permutations(3)
        .into_iter()
        .map(|p| (p.iter().enumerate().map(|(x, &y)| rows[x][y]).sum(), p))
        .collect();
    let best = scored.iter().map(|(t, _)| *t).max().unwrap();
    let winners = scored
        .into_iter()
        .filter(|(t, _)| *t == best)
        .map(|(_, p)| p)
        .collect();
    (best, winners)
}

#[test]
fn three_by_three_sample_matches_exhaustive_search() {
    let rows = [[4, 2, 8], [2, 3, 7], [3, 1, 6]];
    let (best, winners) = ground_truth(&rows);

    let mut solver = HungarianSolver::from_rows(&rows).unwrap();
    let task_to_worker = solver.execute();
    let mut worker_to_task = vec![0; 3];
    for (task, &worker) in task_to_worker.iter().enumerate() {
        worker_to_task[worker] = task;
    }
    let total: i32 = worker_to_task
        .iter()
        .enumerate()
        .map(|(x, &y)| rows[x][y])
        .sum();

    assert_eq!(total, best);
    assert!(winners.contains(&worker_to_task));
}

#[test]
fn single_cell() {
    let assignment = maximize(&[[5]]).unwrap();
    assert_eq!(assignment.task_to_worker(), &[0]);
    assert_eq!(assignment.total(), 5);

    let mut solver = HungarianSolver::from_rows(&[[5]]).unwrap();
    assert_eq!(solver.execute(), vec![0]);
}

#[test]
fn all_equal_weights_total_n_times_value() {
    for n in 1..=12 {
        let rows = vec![vec![7u64; n]; n];
        let assignment = maximize(&rows).unwrap();
        assert_eq!(assignment.total(), 7 * n as u64, "n={n}");
        let mut seen = vec![false; n];
        for &w in assignment.task_to_worker() {
            assert!(!seen[w], "worker {w} assigned twice");
            seen[w] = true;
        }
    }
}

#[test]
fn all_zero_matrix_terminates() {
    let rows = vec![vec![0i32; 9]; 9];
    let assignment = maximize(&rows).unwrap();
    assert_eq!(assignment.total(), 0);
    assert_eq!(assignment.len(), 9);
}

#[test]
fn caller_matrix_is_not_mutated() {
    let rows = vec![vec![4, 2, 8], vec![2, 3, 7], vec![3, 1, 6]];
    let snapshot = rows.clone();
    let matrix = WeightMatrix::new(&rows).unwrap();
    let mut solver = SolverBuilder::new(matrix).minimize().build().unwrap();
    solver.execute();
    solver.execute();
    assert_eq!(rows, snapshot);
}

#[test]
fn identity_like_matrices_pick_the_diagonal() {
    let n = 6;
    let matrix = WeightMatrix::from_fn(n, |x, y| if x == y { 10i32 } else { 1 }).unwrap();
    let assignment = HungarianSolver::new(matrix).unwrap().solve();
    assert_eq!(assignment.worker_to_task(), &[0, 1, 2, 3, 4, 5]);
    assert_eq!(assignment.total(), 60);
}

#[test]
fn anti_diagonal_costs() {
    let n = 5;
    let rows: Vec<Vec<i32>> = (0..n)
        .map(|x| (0..n).map(|y| if x + y == n - 1 { 0 } else { 9 }).collect())
        .collect();
    let assignment = minimize(&rows).unwrap();
    assert_eq!(assignment.total(), 0);
    assert_eq!(assignment.worker_to_task(), &[4, 3, 2, 1, 0]);
}

#[test]
fn shape_errors_fail_fast() {
    let empty: Vec<Vec<i32>> = Vec::new();
    assert_eq!(maximize(&empty), Err(Error::InvalidShape(ShapeError::Empty)));

    let rectangular = vec![vec![1, 2, 3], vec![4, 5, 6]];
    assert_eq!(
        maximize(&rectangular),
        Err(Error::InvalidShape(ShapeError::NotSquare {
            row: 0,
            len: 3,
            expected: 2
        }))
    );

    let ragged = vec![vec![1, 2], vec![3]];
    assert!(matches!(
        minimize(&ragged),
        Err(Error::InvalidShape(ShapeError::NotSquare { row: 1, len: 1, .. }))
    ));
}

#[test]
fn overflow_is_reported_not_wrapped() {
    let rows = [[i16::MAX, 0], [0, i16::MAX]];
    let err = maximize(&rows).unwrap_err();
    assert!(matches!(err, Error::Overflow { n: 2, ty: "i16", .. }));
    assert!(err.to_string().contains("overflow i16"));

    // Widening the element type makes the same instance solvable.
    let wide: Vec<Vec<i64>> = rows
        .iter()
        .map(|r| r.iter().map(|&w| w as i64).collect())
        .collect();
    assert_eq!(maximize(&wide).unwrap().total(), 2 * i16::MAX as i64);
}

#[test]
fn minimize_checks_the_flipped_range_too() {
    // [-16, 16] fits i8 at n = 2, but the flipped range [0, 32] does not.
    let weights = WeightMatrix::new(&[[-16i8, 16], [0, 0]]).unwrap();
    assert!(HungarianSolver::with_objective(weights.clone(), Objective::Maximize).is_ok());
    assert!(matches!(
        HungarianSolver::with_objective(weights, Objective::Minimize),
        Err(Error::Overflow { .. })
    ));
}

#[test]
fn narrow_and_wide_integer_types() {
    let small = [[3u8, 1], [2, 3]];
    assert_eq!(maximize(&small).unwrap().total(), 6u8);

    let big = [[1i128 << 80, 0], [0, 1i128 << 80]];
    assert_eq!(maximize(&big).unwrap().total(), 1i128 << 81);

    let sizes = [[10usize, 20], [30, 5]];
    assert_eq!(minimize(&sizes).unwrap().total(), 15);
}

#[test]
fn from_flat_matches_nested_rows() {
    let flat = WeightMatrix::from_flat(3, vec![4, 2, 8, 2, 3, 7, 3, 1, 6]).unwrap();
    let nested = WeightMatrix::new(&[[4, 2, 8], [2, 3, 7], [3, 1, 6]]).unwrap();
    assert_eq!(flat, nested);
    let a = HungarianSolver::new(flat).unwrap().solve();
    let b = HungarianSolver::new(nested).unwrap().solve();
    assert_eq!(a, b);
}
