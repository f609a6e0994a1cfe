use std::collections::BTreeMap;
use std::env;
use std::time::Instant;

use hungarian_assign::{HungarianSolver, Objective, WeightMatrix};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("assign_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Hungarian Assignment Probe: Performance and Correctness Testing");
    eprintln!("{}", "=".repeat(80));
    eprintln!();
    eprintln!("Each scenario solves deterministic n x n instances of increasing size and checks:");
    eprintln!(
        "  • Baseline: total matches an exact bitmask DP (up to n = {})",
        options.verify_limit
    );
    eprintln!("  • Certificate: final labels sum to the matching weight (every size)");
    eprintln!();
    eprintln!("Metrics explained:");
    eprintln!("  • wall_s: Wall-clock time in seconds (lower is better)");
    eprintln!("  • rss_delta_kib: Memory delta in KiB");
    eprintln!("  • label_updates: Label updates across all augmentations");
    eprintln!("  • status: 'passed' = matches baseline, 'certified' = dual certificate only");
    eprintln!();
    eprintln!("{}", "=".repeat(80));
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();
    let scenarios = Scenario::all();
    let count = scenarios.len();

    for (idx, scenario) in scenarios.iter().enumerate() {
        eprintln!("[{}/{}] {}...", idx + 1, count, scenario.title);
        measurements.extend(run_scenario(scenario, &options, &mut sys));
        eprintln!();
    }

    print_summary(&measurements, &options);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("assign_probe output error: {err}");
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 14usize;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --format".to_string())?
                    .into();
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--verify-limit=") {
                verify_limit = parse_limit(value)?;
            } else if arg == "--verify-limit" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --verify-limit".to_string())?
                    .into();
                verify_limit = parse_limit(&value)?;
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self {
            format,
            verify_limit,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --features probe --bin assign_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Largest n checked against the exact DP baseline (default: 14, max: 20)
  -h, --help                    Print this help message

Examples:
  cargo run --features probe --bin assign_probe
  cargo run --features probe --bin assign_probe -- --format table --verify-limit 10
"
        );
    }
}

fn parse_limit(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(limit) if limit <= 20 => Ok(limit),
        Ok(_) => Err("verify limit above 20 would exhaust memory in the DP baseline".to_string()),
        Err(_) => Err("verify limit must be a non-negative integer".to_string()),
    }
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

struct Scenario {
    name: &'static str,
    title: &'static str,
    objective: Objective,
    sizes: &'static [usize],
    weight: fn(usize, usize, usize) -> i64,
}

impl Scenario {
    fn all() -> Vec<Scenario> {
        const SIZES: &[usize] = &[4, 8, 12, 14, 32, 64, 128, 256, 512];
        vec![
            Scenario {
                name: "uniform_max",
                title: "Uniform pseudo-random benefits, maximised",
                objective: Objective::Maximize,
                sizes: SIZES,
                weight: |x, y, _| mix(x, y) % 10_000,
            },
            Scenario {
                name: "uniform_min",
                title: "Uniform pseudo-random costs, minimised",
                objective: Objective::Minimize,
                sizes: SIZES,
                weight: |x, y, _| mix(y, x) % 10_000,
            },
            Scenario {
                name: "three_values",
                title: "Heavily tied weights in {0, 1, 2}",
                objective: Objective::Maximize,
                sizes: SIZES,
                weight: |x, y, _| mix(x, y) % 3,
            },
            Scenario {
                name: "contested_columns",
                title: "Every row ranks columns identically",
                objective: Objective::Maximize,
                sizes: SIZES,
                weight: |x, y, n| ((n - y) * (x + 1)) as i64,
            },
            Scenario {
                name: "all_equal",
                title: "Constant matrix (every permutation optimal)",
                objective: Objective::Minimize,
                sizes: SIZES,
                weight: |_, _, _| 17,
            },
        ]
    }
}

/// Cheap deterministic hash of a cell position.
fn mix(x: usize, y: usize) -> i64 {
    let mut h = (x as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ (y as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    h ^= h >> 29;
    h = h.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h ^= h >> 32;
    (h >> 1) as i64
}

#[derive(Clone)]
struct Measurement {
    scenario: &'static str,
    n: usize,
    total: i64,
    label_updates: usize,
    wall_s: f64,
    rss_delta_kib: u64,
    verification_status: VerificationStatus,
    verification_detail: Option<String>,
}

#[derive(Clone, Copy)]
enum VerificationStatus {
    Certified,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::Certified => "certified",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "✓",
            VerificationStatus::Certified => "○",
            VerificationStatus::Failed => "✗",
        }
    }
}

fn run_scenario(scenario: &Scenario, options: &Options, sys: &mut System) -> Vec<Measurement> {
    let total_sizes = scenario.sizes.len();
    scenario
        .sizes
        .iter()
        .enumerate()
        .map(|(idx, &n)| {
            eprint!("      [{}/{}] n={}... ", idx + 1, total_sizes, n);
            let weights = match WeightMatrix::from_fn(n, |x, y| (scenario.weight)(x, y, n)) {
                Ok(w) => w,
                Err(err) => return failed(scenario.name, n, err.to_string()),
            };
            let mut solver = match HungarianSolver::with_objective(weights.clone(), scenario.objective) {
                Ok(s) => s,
                Err(err) => return failed(scenario.name, n, err.to_string()),
            };

            let before = rss_kib(sys);
            let start = Instant::now();
            let assignment = solver.solve();
            let wall_s = start.elapsed().as_secs_f64();
            let rss_delta_kib = rss_kib(sys).saturating_sub(before);

            let total = assignment.total();
            let (status, detail) = if !solver.certificate_holds() {
                (
                    VerificationStatus::Failed,
                    Some("labels do not certify the matching".to_string()),
                )
            } else if n <= options.verify_limit {
                let baseline = dp_baseline(&weights, scenario.objective);
                if baseline == total {
                    (VerificationStatus::Passed, None)
                } else {
                    (
                        VerificationStatus::Failed,
                        Some(format!("expected {baseline}, got {total}")),
                    )
                }
            } else {
                (VerificationStatus::Certified, None)
            };

            let m = Measurement {
                scenario: scenario.name,
                n,
                total,
                label_updates: solver.stats().label_updates,
                wall_s,
                rss_delta_kib,
                verification_status: status,
                verification_detail: detail,
            };
            eprintln!(
                "{} total={}, label_updates={}, time={:.3}s, status={}",
                m.verification_status.icon(),
                m.total,
                m.label_updates,
                m.wall_s,
                m.verification_status.label()
            );
            m
        })
        .collect()
}

fn failed(scenario: &'static str, n: usize, detail: String) -> Measurement {
    eprintln!("✗ {detail}");
    Measurement {
        scenario,
        n,
        total: 0,
        label_updates: 0,
        wall_s: 0.0,
        rss_delta_kib: 0,
        verification_status: VerificationStatus::Failed,
        verification_detail: Some(detail),
    }
}

/// Exact optimum by DP over subsets of used columns, O(2^n · n).
fn dp_baseline(weights: &WeightMatrix<i64>, objective: Objective) -> i64 {
    let n = weights.n();
    let unset = match objective {
        Objective::Maximize => i64::MIN,
        Objective::Minimize => i64::MAX,
    };
    let better = |a: i64, b: i64| match objective {
        Objective::Maximize => a > b,
        Objective::Minimize => a < b,
    };
    let mut dp = vec![unset; 1 << n];
    dp[0] = 0;
    for mask in 0usize..(1 << n) {
        if dp[mask] == unset {
            continue;
        }
        let x = mask.count_ones() as usize;
        if x == n {
            continue;
        }
        for y in 0..n {
            if mask & (1 << y) != 0 {
                continue;
            }
            let next = mask | (1 << y);
            let cand = dp[mask] + weights.get(x, y);
            if dp[next] == unset || better(cand, dp[next]) {
                dp[next] = cand;
            }
        }
    }
    dp[(1 << n) - 1]
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Probe Summary");
    eprintln!("{}", "=".repeat(80));
    eprintln!();

    let mut passed = 0;
    let mut certified = 0;
    let mut failed = 0;
    for m in measurements {
        match m.verification_status {
            VerificationStatus::Passed => passed += 1,
            VerificationStatus::Certified => certified += 1,
            VerificationStatus::Failed => failed += 1,
        }
    }

    let total = measurements.len().max(1) as f64;
    eprintln!("Verification Results:");
    eprintln!("  Total runs: {}", measurements.len());
    eprintln!("  ✓ Passed: {} ({:.1}%)", passed, 100.0 * passed as f64 / total);
    eprintln!(
        "  ○ Certified only (n > {}): {} ({:.1}%)",
        options.verify_limit,
        certified,
        100.0 * certified as f64 / total
    );
    eprintln!("  ✗ Failed: {} ({:.1}%)", failed, 100.0 * failed as f64 / total);
    eprintln!();

    if failed > 0 {
        eprintln!("Failed Runs:");
        for m in measurements {
            if matches!(m.verification_status, VerificationStatus::Failed) {
                eprintln!("  ✗ {} (n={})", m.scenario, m.n);
                if let Some(ref detail) = m.verification_detail {
                    eprintln!("     Error: {}", detail);
                }
            }
        }
        eprintln!();
    }

    eprintln!("Performance by Scenario:");
    eprintln!();
    let mut by_scenario: BTreeMap<&str, Vec<&Measurement>> = BTreeMap::new();
    for m in measurements {
        by_scenario.entry(m.scenario).or_default().push(m);
    }
    for (scenario, ms) in &by_scenario {
        let max_time = ms.iter().map(|m| m.wall_s).fold(0.0, f64::max);
        let max_mem = ms.iter().map(|m| m.rss_delta_kib).max().unwrap_or(0);
        let updates: usize = ms.iter().map(|m| m.label_updates).sum();
        eprintln!("  {}:", scenario);
        eprintln!("    Runs: {}", ms.len());
        eprintln!("    Slowest: {:.3}s, max_delta={} KiB", max_time, max_mem);
        eprintln!("    Label updates (all sizes): {}", updates);
        if let (Some(first), Some(last)) = (ms.first(), ms.last()) {
            if first.wall_s > 0.0 && first.n > 0 {
                let size_ratio = last.n as f64 / first.n as f64;
                let time_ratio = last.wall_s / first.wall_s;
                eprintln!(
                    "    Scaling: n x{:.0} -> time x{:.1} (cubic would be x{:.0})",
                    size_ratio,
                    time_ratio,
                    size_ratio.powi(3)
                );
            }
        }
        eprintln!();
    }

    eprintln!("{}", "=".repeat(80));
    if failed == 0 {
        eprintln!("✓ All runs verified.");
    } else {
        eprintln!("✗ {} run(s) failed. Please review the errors above.", failed);
    }
    eprintln!("{}", "=".repeat(80));
    eprintln!();
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,n,total,label_updates,wall_s,rss_delta_kib,verification_status,verification_detail");
    for m in measurements {
        let detail = m
            .verification_detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.n,
            m.total,
            m.label_updates,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let col1 = measurements
        .iter()
        .map(|m| m.scenario.len())
        .max()
        .unwrap_or(0)
        .max("scenario".len());

    println!(
        "{:<col1$}  {:>5}  {:>14}  {:>13}  {:>10}  {:>14}  {:>10}  {}",
        "scenario", "n", "total", "label_updates", "wall_s", "rss_delta_kib", "status", "detail",
        col1 = col1
    );
    println!(
        "{:-<col1$}  {:-<5}  {:-<14}  {:-<13}  {:-<10}  {:-<14}  {:-<10}  {:-<10}",
        "", "", "", "", "", "", "", "",
        col1 = col1
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:>5}  {:>14}  {:>13}  {:>10.3}  {:>14}  {:>10}  {}",
            m.scenario,
            m.n,
            m.total,
            m.label_updates,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            m.verification_detail.as_deref().unwrap_or(""),
            col1 = col1
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = m.verification_detail.as_ref().map(|s| s.replace('"', "'"));
        println!(
            "  {{\"scenario\":\"{}\",\"n\":{},\"total\":{},\"label_updates\":{},\"wall_s\":{:.3},\"rss_delta_kib\":{},\"verification\":{{\"status\":\"{}\",\"detail\":{}}}}}{}",
            m.scenario,
            m.n,
            m.total,
            m.label_updates,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            match detail {
                Some(ref d) => format!("\"{d}\""),
                None => "null".to_string(),
            },
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory()
    } else {
        0
    }
}
