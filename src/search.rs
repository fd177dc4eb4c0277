//! Best-first search over solve states for one graph and grid size.

use crate::cancel::CancellationToken;
use crate::graph::{ConstraintGraph, GroupId};
use crate::grid::PartialGrid;
use crate::solver::TimeBudget;
use crate::state::{Branching, SolveState};
use log::trace;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::rc::Rc;

/// How one search run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SearchOutcome {
    Solved(Rc<PartialGrid>),
    /// One symbol caused more dead ends than any other.
    Localized(char),
    /// No single symbol stood out.
    Ambiguous,
    Cancelled,
    TimedOut,
}

impl SearchOutcome {
    fn label(&self) -> String {
        match self {
            SearchOutcome::Solved(_) => "solved".to_string(),
            SearchOutcome::Localized(symbol) => format!("stuck on {symbol}"),
            SearchOutcome::Ambiguous => "ambiguous".to_string(),
            SearchOutcome::Cancelled => "cancelled".to_string(),
            SearchOutcome::TimedOut => "timed out".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SearchReport {
    pub outcome: SearchOutcome,
    pub states_expanded: usize,
    pub dead_ends: usize,
}

/// Frontier entry. The heap pops the state with the fewest unplaced nodes; among
/// equals, the one pushed last.
struct FrontierEntry {
    remaining: usize,
    seq: u64,
    state: SolveState,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.remaining == other.remaining && self.seq == other.seq
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.remaining.cmp(&self.remaining).then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub(crate) struct SearchDriver<'a> {
    graph: &'a ConstraintGraph,
    size: usize,
    max_tries: usize,
    cancellation: &'a CancellationToken,
    budget: &'a TimeBudget,
}

/// Mutable bookkeeping for a single run; dropped when the run ends.
#[derive(Default)]
struct RunState {
    frontier: BinaryHeap<FrontierEntry>,
    visited: HashSet<Rc<PartialGrid>>,
    sticking: HashMap<GroupId, usize>,
    next_seq: u64,
    states_expanded: usize,
    dead_ends: usize,
    duplicates: usize,
}

impl RunState {
    fn push(&mut self, state: SolveState) {
        if !self.visited.insert(Rc::clone(state.grid())) {
            self.duplicates += 1;
            return;
        }
        let entry = FrontierEntry { remaining: state.unplaced().len(), seq: self.next_seq, state };
        self.next_seq += 1;
        self.frontier.push(entry);
    }

    fn record_dead_end(&mut self, group: GroupId) {
        self.dead_ends += 1;
        *self.sticking.entry(group).or_default() += 1;
    }

    /// The group with strictly the most dead ends, if there is one.
    fn dominant_group(&self) -> Option<GroupId> {
        let best = self.sticking.values().copied().max()?;
        let mut leaders = self.sticking.iter().filter(|&(_, &count)| count == best);
        let (&group, _) = leaders.next()?;
        leaders.next().is_none().then_some(group)
    }
}

impl<'a> SearchDriver<'a> {
    pub fn new(
        graph: &'a ConstraintGraph,
        size: usize,
        max_tries: usize,
        cancellation: &'a CancellationToken,
        budget: &'a TimeBudget,
    ) -> Self {
        SearchDriver { graph, size, max_tries, cancellation, budget }
    }

    pub fn run(&self) -> SearchReport {
        let mut run = RunState::default();
        let outcome = self.search(&mut run);

        trace!(
            "search on {0}x{0}: {1} after {2} expansions, {3} dead ends, {4} duplicate grids, {5} left on frontier",
            self.size,
            outcome.label(),
            run.states_expanded,
            run.dead_ends,
            run.duplicates,
            run.frontier.len()
        );

        SearchReport { outcome, states_expanded: run.states_expanded, dead_ends: run.dead_ends }
    }

    fn search(&self, run: &mut RunState) -> SearchOutcome {
        if self.cancellation.is_cancelled() {
            return SearchOutcome::Cancelled;
        }

        match SolveState::initial(self.graph, self.size).apply_all_single_moves(self.graph) {
            Ok(root) => run.push(root),
            Err(group) => run.record_dead_end(group),
        }

        while let Some(FrontierEntry { state, .. }) = run.frontier.pop() {
            if self.cancellation.is_cancelled() {
                return SearchOutcome::Cancelled;
            }
            if self.budget.expired() {
                return SearchOutcome::TimedOut;
            }
            if run.states_expanded >= self.max_tries {
                break;
            }
            run.states_expanded += 1;

            match state.try_solve(self.graph) {
                Branching::Solved => return SearchOutcome::Solved(Rc::clone(state.grid())),
                Branching::Stuck(group) => run.record_dead_end(group),
                Branching::Children { children, dead_ends } => {
                    for group in dead_ends {
                        run.record_dead_end(group);
                    }
                    for child in children {
                        run.push(child);
                    }
                }
            }
        }

        match run.dominant_group() {
            Some(group) => SearchOutcome::Localized(self.graph.group(group).symbol),
            None => SearchOutcome::Ambiguous,
        }
    }
}
