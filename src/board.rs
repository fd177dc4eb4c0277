//! The finished grid handed back to callers.

use crate::coord::{all_coords, Coord};
use crate::rune::DEFAULT_FILLER;
use std::collections::BTreeMap;
use std::fmt;

/// Letters placed on a square grid of side `size`.
///
/// Cells not listed are unused; callers fill them with whatever filler they like
/// before display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterGrid {
    size: usize,
    cells: BTreeMap<Coord, char>,
}

impl LetterGrid {
    pub fn new(size: usize, cells: impl IntoIterator<Item = (Coord, char)>) -> Self {
        LetterGrid { size, cells: cells.into_iter().collect() }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<char> {
        self.cells.get(&coord).copied()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupied cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, char)> + '_ {
        self.cells.iter().map(|(&c, &l)| (c, l))
    }

    /// Cells holding `letter`.
    pub fn coords_of(&self, letter: char) -> impl Iterator<Item = Coord> + '_ {
        self.cells().filter(move |&(_, l)| l == letter).map(|(c, _)| c)
    }

    /// One line per row, unused cells shown as `filler`.
    #[must_use]
    pub fn render(&self, filler: char) -> String {
        (0..self.size)
            .map(|row| {
                (0..self.size)
                    .map(|col| self.get(Coord::new(row, col)).unwrap_or(filler))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Find a path spelling `word` through adjacent cells, never reusing a cell.
    #[must_use]
    pub fn trace(&self, word: &str) -> Option<Vec<Coord>> {
        let letters: Vec<char> = word.chars().map(|c| c.to_ascii_uppercase()).collect();
        let first = *letters.first()?;

        let mut path: Vec<Coord> = Vec::with_capacity(letters.len());
        for start in all_coords(self.size).filter(|&c| self.get(c) == Some(first)) {
            path.push(start);
            if self.extend_path(&letters, &mut path) {
                return Some(path);
            }
            path.clear();
        }
        None
    }

    fn extend_path(&self, letters: &[char], path: &mut Vec<Coord>) -> bool {
        if path.len() == letters.len() {
            return true;
        }
        let wanted = letters[path.len()];
        let last = path[path.len() - 1];

        for next in last.neighbors(self.size) {
            if self.get(next) != Some(wanted) || path.contains(&next) {
                continue;
            }
            path.push(next);
            if self.extend_path(letters, path) {
                return true;
            }
            path.pop();
        }
        false
    }
}

impl fmt::Display for LetterGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(DEFAULT_FILLER))
    }
}
