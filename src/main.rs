use clap::Parser;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use runegrid::solver::{self, SolveStatus, SolverOptions, DEFAULT_MAX_GRID_SIZE, DEFAULT_MAX_TRIES, TIME_BUDGET};
use runegrid::word_list::WordList;

/// Build a compact letter grid in which every word can be traced through
/// adjacent cells
#[derive(Parser, Debug)]
#[command(author, version = runegrid::VERSION, about, long_about = None)]
struct Cli {
    /// Words to place (case is ignored)
    #[arg(required_unless_present = "word_list")]
    words: Vec<String>,

    /// Read more words from a file (word or word;score per line)
    #[arg(short, long)]
    word_list: Option<String>,

    /// Minimum score for words read from --word-list
    #[arg(short = 'm', long, default_value_t = 0)]
    min_score: i32,

    /// Smallest grid side to start from
    #[arg(short, long)]
    size: Option<usize>,

    /// Largest grid side to try
    #[arg(long = "max-size", default_value_t = DEFAULT_MAX_GRID_SIZE)]
    max_size: usize,

    /// States expanded per search attempt
    #[arg(long = "max-tries", default_value_t = DEFAULT_MAX_TRIES)]
    max_tries: usize,

    /// Give up after this many seconds
    #[arg(short, long = "time-budget", default_value_t = TIME_BUDGET)]
    time_budget: u64,

    /// Character shown in unused cells
    #[arg(short, long, default_value_t = runegrid::DEFAULT_FILLER)]
    filler: char,
}

/// Entry point of the runegrid CLI.
///
/// Delegates to [`try_main`], printing any error before exiting with code 1.
/// A run that finds no grid also exits with code 1.
fn main() -> ExitCode {
    let debug_enabled = std::env::var("RUNEGRID_DEBUG").is_ok();
    runegrid::log::init_logger(debug_enabled);

    log::info!("Starting runegrid {}", runegrid::VERSION);

    match try_main() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            if let Some(solver_err) = e.downcast_ref::<solver::SolverError>() {
                eprintln!("Error: {}", solver_err.display_detailed());
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Core application logic: gather words, solve, print the grid on stdout and
/// diagnostics on stderr. Returns whether a grid was found.
fn try_main() -> Result<bool, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut words = cli.words;
    if let Some(path) = &cli.word_list {
        let t_load = Instant::now();
        let list = WordList::load_from_path(path, cli.min_score)?;
        eprintln!("Loaded {} words in {:.3}s", list.len(), t_load.elapsed().as_secs_f64());
        words.extend(list.words);
    }

    let options = SolverOptions {
        grid_size: cli.size,
        max_grid_size: cli.max_size,
        max_tries: cli.max_tries,
        time_budget: Duration::from_secs(cli.time_budget),
        ..SolverOptions::default()
    };

    let t_solve = Instant::now();
    let result = solver::solve_words(&words, &options)?;
    let solve_secs = t_solve.elapsed().as_secs_f64();

    if let Some(grid) = &result.grid {
        println!("{}", grid.render(cli.filler));
    }

    match result.status {
        SolveStatus::Solved => {
            eprintln!("✓ Placed {} words", words.len());
        }
        SolveStatus::CapacityExhausted => {
            eprintln!("✗ No grid up to {0}x{0} holds these words", cli.max_size);
        }
        SolveStatus::Cancelled => {
            eprintln!("✗ Cancelled");
        }
        SolveStatus::TimedOut { elapsed } => {
            eprintln!("⚠️  Timed out after {:.1}s", elapsed.as_secs_f64());
        }
    }

    let stats = &result.statistics;
    eprintln!(
        "Solved in {:.3}s ({} attempts, {} states expanded, capacities {:?}).",
        solve_secs, stats.attempts, stats.states_expanded, result.capacities
    );

    Ok(result.is_solved())
}
