#![cfg(feature = "heavy")]
use hungarian_assign::{HungarianSolver, Objective, WeightMatrix};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_matrix(rng: &mut StdRng, n: usize, max: i64) -> WeightMatrix<i64> {
    WeightMatrix::from_fn(n, |_, _| rng.gen_range(0..=max)).unwrap()
}

fn assert_permutation(p: &[usize]) {
    let mut seen = vec![false; p.len()];
    for &v in p {
        assert!(!seen[v], "index {v} repeated");
        seen[v] = true;
    }
}

#[test]
fn heavy_stress_random_large() {
    let mut rng = StdRng::seed_from_u64(123);
    for &n in &[200usize, 400] {
        let mut solver = HungarianSolver::new(random_matrix(&mut rng, n, 1_000_000)).unwrap();
        let assignment = solver.solve();
        assert_permutation(assignment.task_to_worker());
        // Labels certify optimality without a baseline.
        assert!(solver.certificate_holds(), "certificate failed at n={n}");
        assert_eq!(solver.feasibility_violation(), None);
    }
}

#[test]
fn heavy_stress_narrow_range_minimize() {
    // Many ties: every weight in 0..=3.
    let mut rng = StdRng::seed_from_u64(7);
    let weights = random_matrix(&mut rng, 300, 3);
    let mut solver = HungarianSolver::with_objective(weights, Objective::Minimize).unwrap();
    let assignment = solver.solve();
    assert_permutation(assignment.worker_to_task());
    assert!(solver.certificate_holds());
    assert!(assignment.total() <= 300 * 3);
}
