//! Grid generation: grow letter capacities until every word fits.
//!
//! # Error Handling
//!
//! The solver uses [`SolverError`] with three variants:
//!
//! - S001: `InvalidWord` (A word could not be normalized (wraps [`WordError`]))
//! - S002: `InvalidGridSize` (A grid size option is zero)
//! - S003: `HintExceedsMaximum` (The size hint is larger than the maximum grid size)
//!
//! Running out of room, time or patience is not an error: those end with a
//! [`SolveStatus`] and no grid.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use runegrid::solver::{self, SolverOptions};
//!
//! let result = solver::solve_words(&["cat", "car"], &SolverOptions::default())?;
//! let grid = result.grid.expect("two short words always fit");
//!
//! assert!(grid.trace("CAT").is_some());
//! println!("{grid}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Handling Errors with Detailed Messages
//!
//! ```
//! use runegrid::solver::{self, SolverOptions};
//!
//! match solver::solve_words(&["c4t"], &SolverOptions::default()) {
//!     Ok(result) => println!("Status: {:?}", result.status),
//!     Err(e) => {
//!         // Show detailed error with code and help
//!         eprintln!("{}", e.display_detailed());
//!     }
//! }
//! ```
//!
//! ## Checking Solve Status
//!
//! ```
//! use runegrid::solver::{self, SolveStatus, SolverOptions};
//!
//! let options = SolverOptions { max_grid_size: 2, ..SolverOptions::default() };
//! let result = solver::solve_words(&["abcdef"], &options)?;
//!
//! match result.status {
//!     SolveStatus::Solved => println!("Found a grid"),
//!     SolveStatus::CapacityExhausted => println!("Needs a bigger grid"),
//!     SolveStatus::Cancelled => println!("Cancelled"),
//!     SolveStatus::TimedOut { elapsed } => {
//!         println!("Timed out after {:?}", elapsed);
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::board::LetterGrid;
use crate::cancel::CancellationToken;
use crate::coord::side_for_cells;
use crate::demand::{rune_demand, total_capacity};
use crate::errors::WordError;
use crate::graph::build_graph;
use crate::search::{SearchDriver, SearchOutcome};
use crate::word_list::WordList;
use instant::Instant;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::time::Duration;

// The amount of time (in seconds) we allow a solve to run
pub const TIME_BUDGET: u64 = 30;
/// Largest grid side tried unless the caller says otherwise.
pub const DEFAULT_MAX_GRID_SIZE: usize = 8;
/// States expanded per search attempt before giving up on that attempt.
pub const DEFAULT_MAX_TRIES: usize = 2_000;

/// Status of the solver run.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveStatus {
    /// A grid containing every word was found.
    Solved,

    /// Growing the capacities further would not fit the largest allowed grid.
    CapacityExhausted,

    /// The cancellation token was raised.
    Cancelled,

    /// Solver stopped because the time budget expired. Contains the elapsed time.
    TimedOut { elapsed: Duration },
}

/// Counters for one solve, across every escalation attempt.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Statistics {
    /// Search attempts run (one per capacity configuration).
    pub attempts: usize,
    /// States taken off the frontier and branched on.
    pub states_expanded: usize,
    /// Attempts that ended blaming a single letter.
    pub localized_failures: usize,
    /// Attempts that ended without a clear culprit.
    pub ambiguous_failures: usize,
    pub duration: Duration,
}

/// Outcome of a solve (even an unsuccessful one).
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// The grid, present only when `status` is [`SolveStatus::Solved`].
    pub grid: Option<LetterGrid>,
    pub status: SolveStatus,
    /// Letter capacities in force when the solve stopped.
    pub capacities: BTreeMap<char, usize>,
    pub statistics: Statistics,
}

impl SolveResult {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.status == SolveStatus::Solved
    }
}

/// Options accepted by [`solve_words`] and [`solve_word_list`].
#[derive(Debug, Clone)]
pub struct SolverOptions {
    /// Smallest grid side to start from; the solver may still go larger.
    pub grid_size: Option<usize>,
    /// Largest grid side the solver may use.
    pub max_grid_size: usize,
    /// Per-attempt limit on expanded states.
    pub max_tries: usize,
    /// Wall-clock limit for the whole solve.
    pub time_budget: Duration,
    pub cancellation: CancellationToken,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            grid_size: None,
            max_grid_size: DEFAULT_MAX_GRID_SIZE,
            max_tries: DEFAULT_MAX_TRIES,
            time_budget: Duration::from_secs(TIME_BUDGET),
            cancellation: CancellationToken::new(),
        }
    }
}

impl SolverOptions {
    fn validate(&self) -> Result<(), SolverError> {
        if self.max_grid_size == 0 {
            return Err(SolverError::InvalidGridSize { size: 0 });
        }
        match self.grid_size {
            Some(0) => Err(SolverError::InvalidGridSize { size: 0 }),
            Some(hint) if hint > self.max_grid_size => {
                Err(SolverError::HintExceedsMaximum { hint, max: self.max_grid_size })
            }
            _ => Ok(()),
        }
    }
}

/// Unified error type for the solver pipeline.
///
/// Only malformed input ends up here; a solve that merely fails to find a grid
/// reports that through [`SolveStatus`].
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// A word was empty or contained something other than letters.
    #[error("invalid word: {0}")]
    InvalidWord(#[from] Box<WordError>),

    /// A grid side of zero was requested.
    #[error("invalid grid size: {size}")]
    InvalidGridSize { size: usize },

    /// The starting size is already larger than the allowed maximum.
    #[error("grid size hint {hint} exceeds maximum grid size {max}")]
    HintExceedsMaximum { hint: usize, max: usize },
}

impl SolverError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::InvalidWord(_) => "S001",
            SolverError::InvalidGridSize { .. } => "S002",
            SolverError::HintExceedsMaximum { .. } => "S003",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            SolverError::InvalidWord(_) => "A word could not be normalized",
            SolverError::InvalidGridSize { .. } => "A grid size option is zero",
            SolverError::HintExceedsMaximum { .. } => "The size hint is larger than the maximum grid size",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            SolverError::InvalidWord(_) => "One of the input words was empty or contained characters other than the letters A-Z. This wraps an underlying WordError (see Word Errors section for specific error codes).",
            SolverError::InvalidGridSize { .. } => "Both the starting grid size and the maximum grid size must be at least 1.",
            SolverError::HintExceedsMaximum { .. } => "The solver starts at the hinted size and only ever grows the grid, so a hint above the maximum can never be honored.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            SolverError::InvalidGridSize { .. } => Some("Use a grid size of 1 or more, or leave the size hint out"),
            SolverError::HintExceedsMaximum { .. } => Some("Lower the size hint or raise the maximum grid size"),
            SolverError::InvalidWord(_) => None, // WordError has its own help
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            SolverError::InvalidWord(we) => {
                // delegate to WordError's detailed display
                format!("{}\n  caused by: {}", self.code(), we.display_detailed())
            }
            _ => crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help()),
        }
    }
}

/// Simple time budget helper.
///
/// Uses `instant::Instant` so it works on native and in the browser.
#[derive(Debug)]
pub(crate) struct TimeBudget {
    start: Instant,   // when the budget began
    limit: Duration,  // maximum allowed elapsed time
}

impl TimeBudget {
    pub(crate) fn new(limit: Duration) -> Self {
        Self { start: Instant::now(), limit }
    }

    /// How long this budget has been running.
    pub(crate) fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns true if the allowed time has fully elapsed.
    pub(crate) fn expired(&self) -> bool {
        self.start.elapsed() >= self.limit
    }
}

/// Normalize `words` and build a grid containing all of them.
///
/// # Errors
///
/// Returns [`SolverError`] when a word is invalid or the size options are.
pub fn solve_words<S: AsRef<str>>(words: &[S], options: &SolverOptions) -> Result<SolveResult, SolverError> {
    options.validate()?;
    let list = WordList::from_words(words)?;
    solve_word_list(&list, options)
}

/// Build a grid for an already normalized word list.
///
/// # Errors
///
/// Returns [`SolverError`] when the size options are invalid.
pub fn solve_word_list(list: &WordList, options: &SolverOptions) -> Result<SolveResult, SolverError> {
    options.validate()?;
    let budget = TimeBudget::new(options.time_budget);
    Ok(escalate(&list.words, options, &budget))
}

/// Bookkeeping carried through the escalation loop.
struct Escalation<'a> {
    options: &'a SolverOptions,
    budget: &'a TimeBudget,
    capacities: BTreeMap<char, usize>,
    statistics: Statistics,
}

impl Escalation<'_> {
    fn finish(mut self, status: SolveStatus, grid: Option<LetterGrid>) -> SolveResult {
        self.statistics.duration = self.budget.elapsed();
        SolveResult { grid, status, capacities: self.capacities, statistics: self.statistics }
    }

    fn timed_out(self) -> SolveResult {
        let elapsed = self.budget.elapsed();
        warn!("time budget of {:?} used up after {} attempts", self.options.time_budget, self.statistics.attempts);
        self.finish(SolveStatus::TimedOut { elapsed }, None)
    }

    fn cancelled(self) -> SolveResult {
        info!("solve cancelled after {} attempts", self.statistics.attempts);
        self.finish(SolveStatus::Cancelled, None)
    }
}

/// The retry loop: search, and on failure grow the pool of the letter to blame.
fn escalate(words: &[String], options: &SolverOptions, budget: &TimeBudget) -> SolveResult {
    let mut run = Escalation { options, budget, capacities: rune_demand(words), statistics: Statistics::default() };

    if words.is_empty() {
        info!("no words given, returning an empty grid");
        return run.finish(SolveStatus::Solved, Some(LetterGrid::default()));
    }

    let max_cells = options.max_grid_size * options.max_grid_size;
    let mut size = options.grid_size.unwrap_or(0);

    loop {
        if options.cancellation.is_cancelled() {
            return run.cancelled();
        }
        if budget.expired() {
            return run.timed_out();
        }

        let total = total_capacity(&run.capacities);
        if total > max_cells {
            warn!(
                "{total} letter cells do not fit a {0}x{0} grid, giving up after {1} attempts",
                options.max_grid_size, run.statistics.attempts
            );
            return run.finish(SolveStatus::CapacityExhausted, None);
        }
        size = size.max(side_for_cells(total));

        run.statistics.attempts += 1;
        let graph = build_graph(words, &run.capacities);
        debug!(
            "attempt {}: {size}x{size} grid, {} nodes, capacities {:?}",
            run.statistics.attempts,
            graph.node_count(),
            run.capacities
        );

        let report = SearchDriver::new(&graph, size, options.max_tries, &options.cancellation, budget).run();
        run.statistics.states_expanded += report.states_expanded;

        let blamed = match report.outcome {
            SearchOutcome::Solved(grid) => {
                info!(
                    "solved {} words on a {size}x{size} grid after {} attempts",
                    words.len(),
                    run.statistics.attempts
                );
                let letters = grid.to_letter_grid(&graph);
                return run.finish(SolveStatus::Solved, Some(letters));
            }
            SearchOutcome::Cancelled => return run.cancelled(),
            SearchOutcome::TimedOut => return run.timed_out(),
            SearchOutcome::Localized(symbol) => {
                run.statistics.localized_failures += 1;
                debug!(
                    "attempt {} got stuck on {symbol} ({} dead ends)",
                    run.statistics.attempts, report.dead_ends
                );
                symbol
            }
            SearchOutcome::Ambiguous => {
                run.statistics.ambiguous_failures += 1;
                // words is non-empty, so the graph has at least one group
                let Some(group) = graph.most_constrained_group() else {
                    return run.finish(SolveStatus::CapacityExhausted, None);
                };
                debug!(
                    "attempt {} failed without a clear culprit, growing most constrained letter {}",
                    run.statistics.attempts, group.symbol
                );
                group.symbol
            }
        };

        *run.capacities.entry(blamed).or_default() += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> SolverOptions {
        SolverOptions::default()
    }

    #[test]
    fn test_default_options() {
        let options = SolverOptions::default();
        assert_eq!(options.grid_size, None);
        assert_eq!(options.max_grid_size, DEFAULT_MAX_GRID_SIZE);
        assert_eq!(options.max_tries, DEFAULT_MAX_TRIES);
        assert_eq!(options.time_budget, Duration::from_secs(TIME_BUDGET));
        assert!(!options.cancellation.is_cancelled());
    }

    #[test]
    fn test_two_words_share_letters() {
        let result = solve_words(&["cat", "car"], &options()).unwrap();
        assert!(result.is_solved());
        let grid = result.grid.unwrap();
        assert_eq!(grid.size(), 2);
        assert_eq!(grid.len(), 4);
        assert!(grid.trace("CAT").is_some());
        assert!(grid.trace("CAR").is_some());
        assert_eq!(result.statistics.attempts, 1);
    }

    #[test]
    fn test_repeated_letter_gets_its_own_cells() {
        let result = solve_words(&["AAA"], &options()).unwrap();
        let grid = result.grid.unwrap();
        assert_eq!(grid.coords_of('A').count(), 3);
        assert!(result.capacities[&'A'] >= 3);
        assert!(grid.trace("AAA").is_some());
    }

    #[test]
    fn test_empty_input_is_solved_without_attempts() {
        let words: [&str; 0] = [];
        let result = solve_words(&words, &options()).unwrap();
        assert!(result.is_solved());
        assert!(result.grid.unwrap().is_empty());
        assert_eq!(result.statistics.attempts, 0);
        assert!(result.capacities.is_empty());
    }

    #[test]
    fn test_size_hint_is_a_floor() {
        let options = SolverOptions { grid_size: Some(4), ..SolverOptions::default() };
        let result = solve_words(&["CAT"], &options).unwrap();
        assert_eq!(result.grid.unwrap().size(), 4);
    }

    #[test]
    fn test_escalation_grows_busy_letter() {
        // a lone A would need ten neighbours, so the first attempt blames A
        let words = ["BAC", "DAE", "FAG", "HAI", "JAK"];
        let result = solve_words(&words, &options()).unwrap();
        assert!(result.is_solved());
        let grid = result.grid.unwrap();
        for word in words {
            assert!(grid.trace(word).is_some(), "{word} missing from\n{grid}");
        }
        assert!(result.statistics.attempts > 1);
        assert!(result.statistics.localized_failures >= 1);
        assert!(result.capacities[&'A'] > 1);
    }

    #[test]
    fn test_capacity_exhausted_on_small_maximum() {
        let options = SolverOptions { max_grid_size: 2, ..SolverOptions::default() };
        let result = solve_words(&["ABCDE"], &options).unwrap();
        assert_eq!(result.status, SolveStatus::CapacityExhausted);
        assert!(result.grid.is_none());
        assert_eq!(result.statistics.attempts, 0);
    }

    #[test]
    fn test_escalation_terminates_when_every_attempt_fails() {
        // no expansions allowed: each attempt is ambiguous and adds one cell,
        // from 3 cells up to the 9 a 3x3 grid holds
        let options = SolverOptions { max_grid_size: 3, max_tries: 0, ..SolverOptions::default() };
        let result = solve_words(&["CAT"], &options).unwrap();
        assert_eq!(result.status, SolveStatus::CapacityExhausted);
        assert_eq!(result.statistics.attempts, 7);
        assert_eq!(result.statistics.ambiguous_failures, 7);
        assert_eq!(result.capacities.values().sum::<usize>(), 10);
    }

    #[test]
    fn test_cancelled_before_start() {
        let options = SolverOptions::default();
        options.cancellation.cancel();
        let result = solve_words(&["CAT"], &options).unwrap();
        assert_eq!(result.status, SolveStatus::Cancelled);
        assert!(result.grid.is_none());
        assert_eq!(result.statistics.states_expanded, 0);
    }

    #[test]
    fn test_zero_time_budget_times_out() {
        let options = SolverOptions { time_budget: Duration::ZERO, ..SolverOptions::default() };
        let result = solve_words(&["CAT"], &options).unwrap();
        assert!(matches!(result.status, SolveStatus::TimedOut { .. }));
        assert!(result.grid.is_none());
    }

    #[test]
    fn test_invalid_word_is_an_error() {
        let err = solve_words(&["C4T"], &options()).unwrap_err();
        assert_eq!(err.code(), "S001");
        assert!(err.display_detailed().contains("W002"));
    }

    #[test]
    fn test_bad_sizes_are_errors() {
        let zero_max = SolverOptions { max_grid_size: 0, ..SolverOptions::default() };
        assert!(matches!(solve_words(&["CAT"], &zero_max), Err(SolverError::InvalidGridSize { size: 0 })));

        let zero_hint = SolverOptions { grid_size: Some(0), ..SolverOptions::default() };
        assert_eq!(solve_words(&["CAT"], &zero_hint).unwrap_err().code(), "S002");

        let big_hint = SolverOptions { grid_size: Some(9), max_grid_size: 4, ..SolverOptions::default() };
        let err = solve_words(&["CAT"], &big_hint).unwrap_err();
        assert!(matches!(err, SolverError::HintExceedsMaximum { hint: 9, max: 4 }));
        assert!(err.display_detailed().contains("Lower the size hint"));
    }

    #[test]
    fn test_solve_word_list_skips_normalization() {
        let list = WordList::from_words(["dog", "god"]).unwrap();
        let result = solve_word_list(&list, &options()).unwrap();
        let grid = result.grid.unwrap();
        assert!(grid.trace("DOG").is_some());
        assert!(grid.trace("GOD").is_some());
    }

    #[test]
    fn test_time_budget() {
        let budget = TimeBudget::new(Duration::from_secs(60));
        assert!(!budget.expired());
        assert!(budget.elapsed() < Duration::from_secs(60));
        assert!(TimeBudget::new(Duration::ZERO).expired());
    }
}
