//! Example: cheapest assignment of drivers to pickups.
//!
//! Run with:
//! `cargo run --example minimize_cost`

use hungarian_assign::{SolverBuilder, WeightMatrix};

fn main() {
    // minutes for driver i to reach pickup j
    let minutes = WeightMatrix::from_fn(5, |driver, pickup| {
        let d = driver as i64 * 3 - pickup as i64 * 4;
        d.abs() + 2 * ((driver + pickup) % 3) as i64
    })
    .expect("5x5 grid");

    let mut solver = SolverBuilder::new(minutes.clone())
        .minimize()
        .build()
        .expect("travel times fit i64");
    let assignment = solver.solve();

    println!("Cheapest dispatch ({} minutes total):", assignment.total());
    for (driver, pickup) in assignment.pairs() {
        println!(
            "  driver {driver} -> pickup {pickup} ({} min)",
            minutes.get(driver, pickup)
        );
    }
    let stats = solver.stats();
    println!(
        "augmentations={}, label_updates={}, rows_admitted={}",
        stats.augmentations, stats.label_updates, stats.rows_admitted
    );
}
