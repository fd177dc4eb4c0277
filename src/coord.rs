//! Cell coordinates in a square grid and the geometry the solver needs.

use std::fmt;

/// The eight compass offsets, as (row delta, column delta).
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Zero-indexed `(row, col)` position, where row 0 is the top row.
///
/// Ordering is lexicographic (row first), which is also the rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True when `other` is one of the 8 cells around `self`.
    #[must_use]
    pub fn is_adjacent(self, other: Coord) -> bool {
        self != other && self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }

    /// In-bounds neighbours in a grid of side `size`.
    pub fn neighbors(self, size: usize) -> impl Iterator<Item = Coord> {
        DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
            let row = self.row.checked_add_signed(dr)?;
            let col = self.col.checked_add_signed(dc)?;
            (row < size && col < size).then_some(Coord { row, col })
        })
    }

    /// The cell this one moves to when the grid turns a quarter clockwise.
    #[must_use]
    pub(crate) fn rotate_quarter(self, size: usize) -> Coord {
        Coord { row: self.col, col: size - 1 - self.row }
    }

    /// Squared distance to the grid centre, in half-cell units so it stays integral.
    #[must_use]
    pub(crate) fn center_distance(self, size: usize) -> usize {
        debug_assert!(size > 0, "an empty grid has no centre");
        let span = size.saturating_sub(1);
        let dr = (2 * self.row).abs_diff(span);
        let dc = (2 * self.col).abs_diff(span);
        dr * dr + dc * dc
    }

    #[must_use]
    pub(crate) fn index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    #[must_use]
    pub(crate) fn from_index(index: usize, size: usize) -> Coord {
        Coord { row: index / size, col: index % size }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Every coordinate of a grid of side `size`, in row-major order.
pub(crate) fn all_coords(size: usize) -> impl Iterator<Item = Coord> {
    (0..size * size).map(move |i| Coord::from_index(i, size))
}

/// Side of the smallest square grid with at least `cells` cells.
#[must_use]
pub fn side_for_cells(cells: usize) -> usize {
    let mut side = 0;
    while side * side < cells {
        side += 1;
    }
    side
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency() {
        let c = Coord::new(1, 1);
        assert!(c.is_adjacent(Coord::new(0, 0)));
        assert!(c.is_adjacent(Coord::new(2, 1)));
        assert!(c.is_adjacent(Coord::new(0, 2)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Coord::new(3, 1)));
        assert!(!Coord::new(0, 0).is_adjacent(Coord::new(0, 2)));
    }

    #[test]
    fn test_neighbor_counts_by_position() {
        assert_eq!(Coord::new(0, 0).neighbors(3).count(), 3);
        assert_eq!(Coord::new(0, 1).neighbors(3).count(), 5);
        assert_eq!(Coord::new(1, 1).neighbors(3).count(), 8);
        assert_eq!(Coord::new(0, 0).neighbors(1).count(), 0);
    }

    #[test]
    fn test_neighbors_are_adjacent() {
        let c = Coord::new(2, 3);
        for n in c.neighbors(5) {
            assert!(c.is_adjacent(n), "{n} should be adjacent to {c}");
        }
    }

    #[test]
    fn test_rotation_cycles_after_four_turns() {
        let size = 4;
        for c in all_coords(size) {
            let mut r = c;
            for _ in 0..4 {
                r = r.rotate_quarter(size);
                assert!(r.row < size && r.col < size);
            }
            assert_eq!(r, c);
        }
        assert_eq!(Coord::new(0, 0).rotate_quarter(3), Coord::new(0, 2));
        assert_eq!(Coord::new(0, 2).rotate_quarter(3), Coord::new(2, 2));
    }

    #[test]
    fn test_rotation_preserves_adjacency() {
        let size = 4;
        for a in all_coords(size) {
            for b in a.neighbors(size) {
                assert!(a.rotate_quarter(size).is_adjacent(b.rotate_quarter(size)));
            }
        }
    }

    #[test]
    fn test_center_distance() {
        assert_eq!(Coord::new(1, 1).center_distance(3), 0);
        assert!(Coord::new(0, 0).center_distance(3) > Coord::new(0, 1).center_distance(3));
        // every cell of a 2x2 grid is equally far from the centre
        let d = Coord::new(0, 0).center_distance(2);
        assert!(all_coords(2).all(|c| c.center_distance(2) == d));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "an empty grid has no centre")]
    fn test_center_distance_needs_a_grid() {
        let _ = Coord::new(0, 0).center_distance(0);
    }

    #[test]
    fn test_index_round_trip() {
        for c in all_coords(5) {
            assert_eq!(Coord::from_index(c.index(5), 5), c);
        }
    }

    #[test]
    fn test_side_for_cells() {
        assert_eq!(side_for_cells(0), 0);
        assert_eq!(side_for_cells(1), 1);
        assert_eq!(side_for_cells(4), 2);
        assert_eq!(side_for_cells(5), 3);
        assert_eq!(side_for_cells(9), 3);
        assert_eq!(side_for_cells(10), 4);
    }
}
