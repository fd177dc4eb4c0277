//! A partially filled grid and its rotation-canonical identity.
//!
//! The grid maps coordinates to the nodes placed on them and keeps a few derived
//! views in step (node → coordinate, cells used per group, count of unused cells).
//!
//! Adjacency is unchanged by quarter turns, so two grids that differ only by a
//! rotation lead to equivalent searches. `PartialGrid` therefore hashes and compares
//! modulo rotation, which lets the search's visited set skip those duplicates.
//! Reflections are deliberately not folded in.

use crate::board::LetterGrid;
use crate::coord::{all_coords, Coord};
use crate::graph::{ConstraintGraph, GroupId, Node, NodeId};
use once_cell::unsync::OnceCell;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Number of distinct quarter-turn rotations of a square.
const ROTATIONS: usize = 4;

/// What a cell records about a node placed on it.
///
/// Slots of one group are interchangeable, so they are recorded by group only;
/// grids differing just in which sibling slot sits where compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum CellEntry {
    Slot(GroupId),
    Occurrence(NodeId),
}

#[derive(Debug, Clone)]
pub struct PartialGrid {
    size: usize,
    /// Row-major; each cell's entries are kept sorted.
    cells: Vec<Vec<CellEntry>>,
    owners: Vec<Option<GroupId>>,
    placements: Vec<Option<Coord>>,
    group_cells: Vec<Vec<Coord>>,
    unused: usize,
    canonical: OnceCell<u64>,
}

impl PartialGrid {
    /// An empty grid of side `size` able to hold every node of `graph`.
    #[must_use]
    pub fn new(size: usize, graph: &ConstraintGraph) -> Self {
        PartialGrid {
            size,
            cells: vec![Vec::new(); size * size],
            owners: vec![None; size * size],
            placements: vec![None; graph.node_count()],
            group_cells: vec![Vec::new(); graph.groups().len()],
            unused: size * size,
            canonical: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn placement(&self, node: NodeId) -> Option<Coord> {
        self.placements[node.index()]
    }

    #[must_use]
    pub fn is_placed(&self, node: NodeId) -> bool {
        self.placements[node.index()].is_some()
    }

    /// The group whose letter occupies `coord`, if any.
    #[must_use]
    pub fn owner(&self, coord: Coord) -> Option<GroupId> {
        self.owners[coord.index(self.size)]
    }

    /// Distinct cells used by `group`, in the order they were claimed.
    #[must_use]
    pub fn group_coords(&self, group: GroupId) -> &[Coord] {
        &self.group_cells[group.index()]
    }

    #[must_use]
    pub fn unused_count(&self) -> usize {
        self.unused
    }

    pub fn unused_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        all_coords(self.size).filter(move |&c| self.owner(c).is_none())
    }

    /// Occupied cells and their owning group, in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, GroupId)> + '_ {
        self.owners
            .iter()
            .enumerate()
            .filter_map(move |(i, owner)| owner.map(|g| (Coord::from_index(i, self.size), g)))
    }

    /// A new grid with `node` placed on `coord`.
    ///
    /// Legality is the caller's business (see `SolveState::can_play`); this only
    /// guards the structural invariants.
    ///
    /// # Panics
    ///
    /// Panics if `node` is already placed or `coord` belongs to another group.
    #[must_use]
    pub fn with_placement(&self, node: &Node, coord: Coord) -> PartialGrid {
        let id = node.id();
        let group = node.group();
        assert!(!self.is_placed(id), "node {id} is already placed");

        let mut next = self.clone();
        next.canonical = OnceCell::new();

        let index = coord.index(self.size);
        match next.owners[index] {
            Some(owner) => assert_eq!(owner, group, "cell {coord} already holds another letter"),
            None => {
                next.owners[index] = Some(group);
                next.group_cells[group.index()].push(coord);
                next.unused -= 1;
            }
        }

        let entry = match node {
            Node::Slot { .. } => CellEntry::Slot(group),
            Node::Occurrence { .. } => CellEntry::Occurrence(id),
        };
        let cell = &mut next.cells[index];
        let pos = cell.binary_search(&entry).unwrap_or_else(|p| p);
        cell.insert(pos, entry);

        next.placements[id.index()] = Some(coord);
        next
    }

    /// The occupied cells as they would appear after `turns` quarter turns, sorted.
    fn signature(&self, turns: usize) -> Vec<(Coord, &[CellEntry])> {
        let mut sig: Vec<(Coord, &[CellEntry])> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(i, entries)| {
                let mut c = Coord::from_index(i, self.size);
                for _ in 0..turns {
                    c = c.rotate_quarter(self.size);
                }
                (c, entries.as_slice())
            })
            .collect();
        sig.sort_unstable_by_key(|&(c, _)| c);
        sig
    }

    /// Rotation-invariant fingerprint: the smallest positional hash over all turns.
    #[must_use]
    pub fn canonical_hash(&self) -> u64 {
        *self.canonical.get_or_init(|| {
            (0..ROTATIONS)
                .map(|turns| {
                    let mut hasher = DefaultHasher::new();
                    self.size.hash(&mut hasher);
                    self.signature(turns).hash(&mut hasher);
                    hasher.finish()
                })
                .min()
                .unwrap_or_default()
        })
    }

    /// Same grid turned a quarter clockwise.
    #[cfg(test)]
    pub(crate) fn rotated(&self) -> PartialGrid {
        let mut next = self.clone();
        next.canonical = OnceCell::new();
        for c in all_coords(self.size) {
            let to = c.rotate_quarter(self.size).index(self.size);
            let from = c.index(self.size);
            next.cells[to] = self.cells[from].clone();
            next.owners[to] = self.owners[from];
        }
        for placement in next.placements.iter_mut().flatten() {
            *placement = placement.rotate_quarter(self.size);
        }
        for coords in &mut next.group_cells {
            for c in coords.iter_mut() {
                *c = c.rotate_quarter(self.size);
            }
        }
        next
    }

    /// Letters on every occupied cell.
    #[must_use]
    pub fn to_letter_grid(&self, graph: &ConstraintGraph) -> LetterGrid {
        LetterGrid::new(
            self.size,
            self.occupied().map(|(c, g)| (c, graph.group(g).symbol)),
        )
    }
}

impl PartialEq for PartialGrid {
    fn eq(&self, other: &Self) -> bool {
        if self.size != other.size
            || self.unused != other.unused
            || self.canonical_hash() != other.canonical_hash()
        {
            return false;
        }
        let target = other.signature(0);
        (0..ROTATIONS).any(|turns| self.signature(turns) == target)
    }
}

impl Eq for PartialGrid {}

impl Hash for PartialGrid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_hash().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand::rune_demand;
    use crate::graph::build_graph;

    fn graph_for(words: &[&str]) -> ConstraintGraph {
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        build_graph(&words, &rune_demand(&words))
    }

    /// Place the occurrences of word `word_index` along `path`.
    fn place_word(graph: &ConstraintGraph, grid: PartialGrid, word_index: usize, path: &[Coord]) -> PartialGrid {
        let mut grid = grid;
        let occurrences: Vec<&Node> = graph
            .nodes()
            .iter()
            .filter(|n| matches!(n, Node::Occurrence { word, .. } if *word == word_index))
            .collect();
        for (node, &c) in occurrences.into_iter().zip(path) {
            grid = grid.with_placement(node, c);
        }
        grid
    }

    #[test]
    fn test_placement_updates_views() {
        let graph = graph_for(&["CAT"]);
        let grid = PartialGrid::new(2, &graph);
        assert_eq!(grid.unused_count(), 4);

        let grid = place_word(&graph, grid, 0, &[Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)]);
        assert_eq!(grid.unused_count(), 1);
        assert_eq!(grid.unused_coords().collect::<Vec<_>>(), vec![Coord::new(1, 0)]);

        let c = graph.group_for_symbol('C').unwrap();
        assert_eq!(grid.owner(Coord::new(0, 0)), Some(c));
        assert_eq!(grid.group_coords(c), &[Coord::new(0, 0)]);

        let slot_c = graph.group(c).slots[0];
        assert!(!grid.is_placed(slot_c));
        let grid = grid.with_placement(graph.node(slot_c), Coord::new(0, 0));
        assert_eq!(grid.placement(slot_c), Some(Coord::new(0, 0)));
        // stacking on an owned cell does not use another cell
        assert_eq!(grid.unused_count(), 1);
        assert_eq!(grid.group_coords(c).len(), 1);
    }

    #[test]
    fn test_original_grid_is_untouched() {
        let graph = graph_for(&["CAT"]);
        let empty = PartialGrid::new(3, &graph);
        let slot = graph.groups()[0].slots[0];
        let placed = empty.with_placement(graph.node(slot), Coord::new(1, 1));
        assert!(!empty.is_placed(slot));
        assert!(placed.is_placed(slot));
        assert_ne!(empty, placed);
    }

    #[test]
    #[should_panic(expected = "already placed")]
    fn test_double_placement_is_fatal() {
        let graph = graph_for(&["CAT"]);
        let slot = graph.groups()[0].slots[0];
        let grid = PartialGrid::new(3, &graph).with_placement(graph.node(slot), Coord::new(0, 0));
        let _ = grid.with_placement(graph.node(slot), Coord::new(1, 1));
    }

    #[test]
    #[should_panic(expected = "another letter")]
    fn test_mixing_letters_in_a_cell_is_fatal() {
        let graph = graph_for(&["CAT"]);
        let a = graph.groups()[0].slots[0];
        let c = graph.groups()[1].slots[0];
        let grid = PartialGrid::new(3, &graph).with_placement(graph.node(a), Coord::new(0, 0));
        let _ = grid.with_placement(graph.node(c), Coord::new(0, 0));
    }

    #[test]
    fn test_rotations_share_canonical_hash_and_compare_equal() {
        let graph = graph_for(&["CAT"]);
        let grid = place_word(
            &graph,
            PartialGrid::new(3, &graph),
            0,
            &[Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 2)],
        );

        let mut turned = grid.clone();
        for _ in 0..3 {
            turned = turned.rotated();
            assert_eq!(turned.canonical_hash(), grid.canonical_hash());
            assert_eq!(turned, grid);
        }
        let full_turn = turned.rotated();
        assert_eq!(full_turn.signature(0), grid.signature(0));
    }

    #[test]
    fn test_reflection_is_not_folded() {
        let graph = graph_for(&["CAT"]);
        let grid = place_word(
            &graph,
            PartialGrid::new(3, &graph),
            0,
            &[Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 2)],
        );
        // mirror image across the vertical axis
        let mirrored = place_word(
            &graph,
            PartialGrid::new(3, &graph),
            0,
            &[Coord::new(0, 2), Coord::new(0, 1), Coord::new(1, 0)],
        );
        assert_ne!(grid, mirrored);
    }

    #[test]
    fn test_different_layouts_differ() {
        let graph = graph_for(&["CAT"]);
        let straight = place_word(
            &graph,
            PartialGrid::new(3, &graph),
            0,
            &[Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)],
        );
        let bent = place_word(
            &graph,
            PartialGrid::new(3, &graph),
            0,
            &[Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)],
        );
        assert_ne!(straight, bent);
    }

    #[test]
    fn test_sibling_slots_are_interchangeable() {
        let graph = graph_for(&["AA"]);
        let a = &graph.groups()[0];
        let (s0, s1) = (graph.node(a.slots[0]), graph.node(a.slots[1]));
        let empty = PartialGrid::new(2, &graph);

        let one = empty.with_placement(s0, Coord::new(0, 0));
        let other = empty.with_placement(s1, Coord::new(0, 0));
        assert_eq!(one, other);
        assert_eq!(one.canonical_hash(), other.canonical_hash());
    }

    #[test]
    fn test_visited_set_collapses_rotations() {
        use std::collections::HashSet;

        let graph = graph_for(&["CAT"]);
        let slot = graph.node(graph.groups()[0].slots[0]);
        let empty = PartialGrid::new(3, &graph);

        let mut seen = HashSet::new();
        let corners = [Coord::new(0, 0), Coord::new(0, 2), Coord::new(2, 2), Coord::new(2, 0)];
        let fresh = corners
            .iter()
            .filter(|&&c| seen.insert(empty.with_placement(slot, c)))
            .count();
        assert_eq!(fresh, 1);
        assert!(seen.insert(empty.with_placement(slot, Coord::new(1, 1))));
    }

    #[test]
    fn test_to_letter_grid() {
        let graph = graph_for(&["CAT"]);
        let grid = place_word(
            &graph,
            PartialGrid::new(2, &graph),
            0,
            &[Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)],
        );
        let letters = grid.to_letter_grid(&graph);
        assert_eq!(letters.size(), 2);
        assert_eq!(letters.get(Coord::new(0, 0)), Some('C'));
        assert_eq!(letters.get(Coord::new(1, 1)), Some('T'));
        assert_eq!(letters.get(Coord::new(1, 0)), None);
    }
}
