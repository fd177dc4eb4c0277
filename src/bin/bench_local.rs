//! `bench_local.rs`: quick local timing runner (no Criterion)
//!
//! PURPOSE
//! -------
//! - Fast, ad-hoc timing for a handful of word sets on *your* machine.
//! - Runs each set several times and reports the median.
//! - Optionally shows a reference time per set and the delta %.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:                `cargo run --bin bench_local --release`
//! - Multiple repeats:               `cargo run --bin bench_local --release -- -r 5`
//! - Print the grids found:          `cargo run --bin bench_local --release -- -p`
//! - See all flags:                  `cargo run --bin bench_local -- --help`
//!
//! NOTES
//! -----
//! - Quick and convenient, not statistically rigorous.
//! - Word sets + optional reference times live in `get_cases()` below.
//! - One warm-up run per set is done (not included in timing).
//! - We report the *median* over repeats (more robust than mean for small _N_).

use clap::Parser;
use runegrid::solver::{self, SolveResult, SolveStatus, SolverOptions, DEFAULT_MAX_GRID_SIZE};
use std::hint::black_box;
use std::time::Instant;

/// Simple local benchmark runner: time grid generation for fixed word sets.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of repeats per word set (use >1 to reduce noise; median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 1)]
    num_repeats: usize,

    /// Print the grid from the last run of each set
    #[arg(short = 'p', long = "print")]
    print_grids: bool,

    /// Largest grid side the solver may use
    #[arg(long = "max-size", default_value_t = DEFAULT_MAX_GRID_SIZE)]
    max_grid_size: usize,
}

/// A benchmark case: the words to place and an optional reference time (seconds).
#[derive(Clone)]
struct Case {
    name: &'static str,
    words: &'static [&'static str],
    reference_s: Option<f64>,
}

/// Edit/add new word sets here.
fn get_cases() -> Vec<Case> {
    vec![
        Case { name: "pair", words: &["cat", "car"], reference_s: None },
        Case { name: "repeats", words: &["banana", "bandana", "anagram"], reference_s: None },
        Case { name: "busy hub", words: &["bac", "dae", "fag", "hai", "jak"], reference_s: None },
        Case {
            name: "animals",
            words: &["otter", "tiger", "eagle", "gerbil", "beetle", "llama"],
            reference_s: None,
        },
        Case {
            name: "planets",
            words: &["mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus", "neptune"],
            reference_s: None,
        },
    ]
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

fn status_label(result: &SolveResult) -> String {
    match (&result.status, &result.grid) {
        (SolveStatus::Solved, Some(grid)) => format!("{0}x{0}", grid.size()),
        (SolveStatus::TimedOut { elapsed }, _) => format!("timeout {:.1}s", elapsed.as_secs_f64()),
        (status, _) => format!("{status:?}"),
    }
}

const MAX_NAME_LEN: usize = 16;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// One row in the benchmark summary: (name, median seconds, outcome, attempts,
    /// optional reference time, optional delta).
    type SummaryRow = (String, f64, String, usize, Option<f64>, Option<f64>);

    let cli = Cli::parse();
    let options = SolverOptions { max_grid_size: cli.max_grid_size, ..SolverOptions::default() };

    let cases = get_cases();
    let mut summary: Vec<SummaryRow> = Vec::with_capacity(cases.len());

    for (idx, case) in cases.iter().enumerate() {
        eprintln!("\n[{:02}] {} ({})", idx + 1, case.name, case.words.join(", "));

        // warm-up, not timed
        if let Err(e) = solver::solve_words(case.words, &options) {
            eprintln!("  ✗ Warm-up failed: {}", e.display_detailed());
            continue;
        }

        let mut times = Vec::with_capacity(cli.num_repeats);
        let mut last_result: Option<SolveResult> = None;

        for rep in 0..cli.num_repeats {
            let t_solve = Instant::now();
            let result = solver::solve_words(black_box(case.words), &options)?;
            let solve_secs = t_solve.elapsed().as_secs_f64();

            times.push(solve_secs);
            eprintln!(
                "  run {:>2}/{:>2}: {:.3}s ({}, {} states)",
                rep + 1,
                cli.num_repeats,
                solve_secs,
                status_label(&result),
                result.statistics.states_expanded
            );
            last_result = Some(result);
        }

        let med = median(times);
        let Some(result) = last_result else {
            continue;
        };

        if cli.print_grids {
            if let Some(grid) = &result.grid {
                println!("{}\n{grid}", case.name);
            }
        }

        let delta_pct = case.reference_s.and_then(|exp| (exp > 0.0).then(|| (med - exp) / exp * 100.0));

        eprintln!(
            "  → median {:.3}s over {} run(s); {}{}",
            med,
            cli.num_repeats,
            status_label(&result),
            match (case.reference_s, delta_pct) {
                (Some(exp), Some(dp)) => format!(" (reference {exp:.3}s, Δ = {dp:+.1}%)"),
                _ => String::new(),
            }
        );

        summary.push((
            case.name.to_string(),
            med,
            status_label(&result),
            result.statistics.attempts,
            case.reference_s,
            delta_pct,
        ));
    }

    eprintln!("\n==== Summary ====");
    eprintln!(
        "{:<MAX_NAME_LEN$} | {:>10} | {:>14} | {:>8} | {:>10} | {:>8}",
        "word set", "median (s)", "outcome", "attempts", "ref (s)", "Δ %"
    );
    eprintln!("{:-<MAX_NAME_LEN$}-+-{:-<10}-+-{:-<14}-+-{:-<8}-+-{:-<10}-+-{:-<8}", "", "", "", "", "", "");
    for (name, med, outcome, attempts, reference, delta_pct) in &summary {
        let reference_str = reference.map(|x| format!("{x:.1}")).unwrap_or_else(|| "—".into());
        let dp_str = delta_pct.map(|x| format!("{x:+.1}")).unwrap_or_else(|| "—".into());
        eprintln!(
            "{name:<MAX_NAME_LEN$} | {med:>10.3} | {outcome:>14} | {attempts:>8} | {reference_str:>10} | {dp_str:>8}"
        );
    }

    Ok(())
}
