//! Value types for slots and words.
//!
//! This module provides the small `Copy` types the rest of the crate keys
//! maps and arcs on: a slot's structural identity, its orientation, and the
//! index of an interned word.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Orientation of a slot in the grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Left to right within a row.
    Across,
    /// Top to bottom within a column.
    Down,
}

impl Direction {
    /// Returns the (row, column) step taken between consecutive cells.
    pub fn step(self) -> (usize, usize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A slot: a maximal run of fillable cells holding one word.
///
/// Slots are derived from the grid once and never change. Two slots are equal
/// when they start at the same cell in the same direction; the length is
/// determined by the grid and takes no part in equality or hashing.
///
/// # Invariants
///
/// - A slot spans at least 2 cells (a single free cell cannot hold a word
///   that intersects anything).
#[derive(Debug, Copy, Clone)]
pub struct Slot {
    row: usize,
    col: usize,
    direction: Direction,
    length: usize,
}

impl Slot {
    /// Creates a slot starting at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `length < 2`.
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Self {
        assert!(length >= 2, "Slots must span at least 2 cells");
        Slot { row, col, direction, length }
    }

    /// Starting row of the slot.
    pub fn row(self) -> usize {
        self.row
    }

    /// Starting column of the slot.
    pub fn col(self) -> usize {
        self.col
    }

    /// Orientation of the slot.
    pub fn direction(self) -> Direction {
        self.direction
    }

    /// Number of cells (and therefore word characters) the slot spans.
    pub fn length(self) -> usize {
        self.length
    }

    /// Returns the grid cells covered by the slot, in word order.
    pub fn cells(self) -> impl Iterator<Item = (usize, usize)> {
        let (dr, dc) = self.direction.step();
        (0..self.length).map(move |k| (self.row + k * dr, self.col + k * dc))
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row && self.col == other.col && self.direction == other.direction
    }
}

impl Eq for Slot {}

impl Hash for Slot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.row.hash(state);
        self.col.hash(state);
        self.direction.hash(state);
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = match self.direction {
            Direction::Across => 'A',
            Direction::Down => 'D',
        };
        write!(f, "{}({},{}):{}", d, self.row, self.col, self.length)
    }
}

/// Index of a word in a [`WordList`][crate::words::WordList].
///
/// Word ids are dense, stable, and cheap to copy; domains and assignments
/// store these instead of the strings themselves.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct WordId(u32);

impl WordId {
    pub(crate) fn new(raw: u32) -> Self {
        WordId(raw)
    }

    /// Returns the raw index as a `usize`.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

impl From<WordId> for usize {
    fn from(id: WordId) -> Self {
        id.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_cells_across() {
        let slot = Slot::new(1, 0, Direction::Across, 3);
        let cells: Vec<_> = slot.cells().collect();
        assert_eq!(cells, vec![(1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_slot_cells_down() {
        let slot = Slot::new(0, 2, Direction::Down, 4);
        let cells: Vec<_> = slot.cells().collect();
        assert_eq!(cells, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_slot_identity_ignores_length() {
        let a = Slot::new(0, 0, Direction::Across, 2);
        let b = Slot::new(0, 0, Direction::Across, 3);
        let c = Slot::new(0, 0, Direction::Down, 2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    #[should_panic(expected = "Slots must span at least 2 cells")]
    fn test_slot_too_short_panics() {
        Slot::new(0, 0, Direction::Across, 1);
    }

    #[test]
    fn test_slot_display() {
        let across = Slot::new(1, 0, Direction::Across, 3);
        let down = Slot::new(0, 1, Direction::Down, 3);
        assert_eq!(across.to_string(), "A(1,0):3");
        assert_eq!(down.to_string(), "D(0,1):3");
    }

    #[test]
    fn test_word_id_ordering() {
        let w0 = WordId::new(0);
        let w1 = WordId::new(1);
        assert!(w0 < w1);
        assert_eq!(w0.index(), 0);
        assert_eq!(w1.to_string(), "w1");
    }
}
