//! Search states: a partial grid plus the nodes still waiting for a cell.
//!
//! States are immutable. Placing a node produces a new state that shares nothing
//! mutable with its parent, so the frontier can hold many of them and dropping a
//! branch is all the backtracking there is.

use crate::coord::Coord;
use crate::graph::{ConstraintGraph, GroupId, NodeId, SymbolGroup};
use crate::grid::PartialGrid;
use std::cmp::{Ordering, Reverse};
use std::rc::Rc;

/// Result of expanding a state once.
#[derive(Debug)]
pub(crate) enum Branching {
    /// Every node is placed.
    Solved,
    /// The branching node had nowhere to go.
    Stuck(GroupId),
    /// Feasible children, plus the sticking group of every child that propagation
    /// ruled out.
    Children { children: Vec<SolveState>, dead_ends: Vec<GroupId> },
}

#[derive(Debug, Clone)]
pub struct SolveState {
    grid: Rc<PartialGrid>,
    unplaced: Vec<NodeId>,
}

/// Does `group` have at least as many usable cells around `coord` as it has
/// distinct neighbouring letters?
fn has_room(grid: &PartialGrid, group: &SymbolGroup, coord: Coord) -> bool {
    let usable = coord
        .neighbors(grid.size())
        .filter(|&n| match grid.owner(n) {
            None => true,
            Some(owner) => group.adjacent_groups.binary_search(&owner).is_ok(),
        })
        .count();
    usable >= group.adjacent_groups.len()
}

fn has_unplaced_occurrence(grid: &PartialGrid, group: &SymbolGroup) -> bool {
    group.occurrences.iter().any(|&occ| !grid.is_placed(occ))
}

/// Cells a node of `group` could claim: the group's own cells, plus every unused
/// cell while the group still has spare capacity.
fn group_locations(grid: &PartialGrid, group_id: GroupId, group: &SymbolGroup, allow_new: bool) -> Vec<Coord> {
    let used = grid.group_coords(group_id);
    let mut locations = used.to_vec();
    if allow_new && used.len() < group.pool_size() {
        locations.extend(grid.unused_coords());
    }
    locations
}

/// Every cell `node` could legally be placed on right now, sorted.
#[must_use]
pub fn find_possible_locations(graph: &ConstraintGraph, grid: &PartialGrid, node: NodeId) -> Vec<Coord> {
    if let Some(at) = grid.placement(node) {
        return vec![at];
    }

    let group_id = graph.node(node).group();
    let group = graph.group(group_id);

    let mut locations = if graph.node(node).is_slot() {
        // a slot only opens a new cell for occurrences that still need one
        group_locations(grid, group_id, group, has_unplaced_occurrence(grid, group))
    } else {
        let mut locations = group_locations(grid, group_id, group, true);
        for &neighbour in graph.adjacent(node) {
            if let Some(at) = grid.placement(neighbour) {
                locations.retain(|c| c.is_adjacent(at));
            }
        }
        for &partner in graph.exclusive(node) {
            if let Some(at) = grid.placement(partner) {
                locations.retain(|&c| c != at);
            }
        }
        locations
    };

    if group.needs_room() {
        locations.retain(|&c| has_room(grid, group, c));
    }
    locations.sort_unstable();
    locations
}

/// Can `node` go on `coord` without breaking any grid invariant?
#[must_use]
pub fn can_play(graph: &ConstraintGraph, grid: &PartialGrid, node: NodeId, coord: Coord) -> bool {
    if grid.is_placed(node) || coord.row >= grid.size() || coord.col >= grid.size() {
        return false;
    }

    let group_id = graph.node(node).group();
    let group = graph.group(group_id);

    match grid.owner(coord) {
        Some(owner) if owner != group_id => return false,
        Some(_) => {}
        None => {
            if grid.group_coords(group_id).len() >= group.pool_size() {
                return false;
            }
            if graph.node(node).is_slot() && !has_unplaced_occurrence(grid, group) {
                return false;
            }
        }
    }

    if graph.exclusive(node).iter().any(|&p| grid.placement(p) == Some(coord)) {
        return false;
    }

    let neighbours_ok = graph
        .adjacent(node)
        .iter()
        .filter_map(|&n| grid.placement(n))
        .all(|at| at.is_adjacent(coord));
    if !neighbours_ok {
        return false;
    }

    !group.needs_room() || has_room(grid, group, coord)
}

impl SolveState {
    /// Nothing placed yet on an empty grid of side `size`.
    #[must_use]
    pub fn initial(graph: &ConstraintGraph, size: usize) -> Self {
        SolveState {
            grid: Rc::new(PartialGrid::new(size, graph)),
            unplaced: graph.nodes().iter().map(|n| n.id()).collect(),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Rc<PartialGrid> {
        &self.grid
    }

    pub fn unplaced(&self) -> &[NodeId] {
        &self.unplaced
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// The state with `node` on `coord`. The caller has checked [`can_play`].
    #[must_use]
    pub fn place(&self, graph: &ConstraintGraph, node: NodeId, coord: Coord) -> SolveState {
        SolveState {
            grid: Rc::new(self.grid.with_placement(graph.node(node), coord)),
            unplaced: self.unplaced.iter().copied().filter(|&n| n != node).collect(),
        }
    }

    /// Place every node that has exactly one option, repeatedly, until none is left.
    ///
    /// # Errors
    ///
    /// Returns the group of the first node found with no option at all (or whose
    /// only option was taken away by an earlier forced move).
    pub fn apply_all_single_moves(self, graph: &ConstraintGraph) -> Result<SolveState, GroupId> {
        let mut state = self;
        loop {
            let mut forced: Vec<(NodeId, Coord)> = Vec::new();
            for &node in &state.unplaced {
                match find_possible_locations(graph, &state.grid, node).as_slice() {
                    [] => return Err(graph.node(node).group()),
                    [only] => forced.push((node, *only)),
                    _ => {}
                }
            }

            if forced.is_empty() {
                return Ok(state);
            }

            for (node, coord) in forced {
                if !can_play(graph, &state.grid, node, coord) {
                    return Err(graph.node(node).group());
                }
                state = state.place(graph, node, coord);
            }
        }
    }

    /// Tightest node first: fewest options, then smallest pool, then highest
    /// constraint score, then lowest id.
    fn compare_candidates(
        graph: &ConstraintGraph,
        (a, a_locations): &(NodeId, Vec<Coord>),
        (b, b_locations): &(NodeId, Vec<Coord>),
    ) -> Ordering {
        let (ga, gb) = (graph.group_of(*a), graph.group_of(*b));
        a_locations
            .len()
            .cmp(&b_locations.len())
            .then_with(|| ga.pool_size().cmp(&gb.pool_size()))
            .then_with(|| gb.constraint_score.total_cmp(&ga.constraint_score))
            .then_with(|| a.cmp(b))
    }

    /// Expand this state by branching on its most constrained node.
    pub(crate) fn try_solve(&self, graph: &ConstraintGraph) -> Branching {
        let chosen = self
            .unplaced
            .iter()
            .map(|&n| (n, find_possible_locations(graph, &self.grid, n)))
            .min_by(|a, b| Self::compare_candidates(graph, a, b));

        let Some((node, mut locations)) = chosen else {
            return Branching::Solved;
        };

        let group_id = graph.node(node).group();
        if locations.is_empty() {
            return Branching::Stuck(group_id);
        }

        // Lone letters go out toward the edges, letters with copies stay central.
        let size = self.grid.size();
        if graph.group(group_id).pool_size() == 1 {
            locations.sort_by_key(|&c| (Reverse(c.center_distance(size)), c));
        } else {
            locations.sort_by_key(|&c| (c.center_distance(size), c));
        }

        let mut children = Vec::with_capacity(locations.len());
        let mut dead_ends = Vec::new();
        for coord in locations {
            if !can_play(graph, &self.grid, node, coord) {
                dead_ends.push(group_id);
                continue;
            }
            match self.place(graph, node, coord).apply_all_single_moves(graph) {
                Ok(child) => children.push(child),
                Err(stuck) => dead_ends.push(stuck),
            }
        }

        Branching::Children { children, dead_ends }
    }
}
