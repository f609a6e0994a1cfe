//! Example: assign three workers to three tasks for maximum total benefit.
//!
//! Run with:
//! `cargo run --example assign`

use hungarian_assign::HungarianSolver;

fn main() {
    // benefit[i][j]: value of worker i doing task j
    let benefit = [[4, 2, 8], [2, 3, 7], [3, 1, 6]];

    let mut solver = match HungarianSolver::from_rows(&benefit) {
        Ok(solver) => solver,
        Err(err) => {
            eprintln!("assign: {err}");
            std::process::exit(2);
        }
    };

    // execute() answers "which worker does task j"; invert it for printing.
    let task_to_worker = solver.execute();
    let mut worker_to_task = vec![0; task_to_worker.len()];
    for (task, &worker) in task_to_worker.iter().enumerate() {
        worker_to_task[worker] = task;
    }

    println!("Optimal assignment:");
    for (worker, task) in worker_to_task.iter().enumerate() {
        println!("Worker {worker} assigned to task {task}");
    }
    let total: i32 = worker_to_task
        .iter()
        .enumerate()
        .map(|(worker, &task)| benefit[worker][task])
        .sum();
    println!("Total benefit: {total}");
}
