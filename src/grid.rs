//! Grid geometry: deriving slots and overlaps from a fillable-cell matrix.
//!
//! A crossword grid is a rectangular boolean matrix where `true` marks a
//! fillable cell. Scanning the matrix yields the puzzle's [`Slot`]s (maximal
//! horizontal and vertical runs of fillable cells of length >= 2) and, for
//! every pair of perpendicular slots that share a cell, the [overlap]: the
//! character offset of the shared cell within each slot's word.
//!
//! The scan is pure and deterministic: across slots are found row by row,
//! then down slots column by column, and that order is preserved everywhere
//! the crate iterates slots.
//!
//! [overlap]: Grid::overlap
//!
//! # Example
//!
//! ```
//! use crossfill::grid::Grid;
//! use crossfill::types::Direction;
//!
//! // A plus-shaped grid: one across slot and one down slot crossing at
//! // the center.
//! let grid = Grid::from_pattern("
//! #.#
//! ...
//! #.#
//! ").unwrap();
//!
//! let slots = grid.slots();
//! assert_eq!(slots.len(), 2);
//! assert_eq!(slots[0].direction(), Direction::Across);
//! assert_eq!(slots[1].direction(), Direction::Down);
//!
//! // The shared cell (1,1) is character 1 of both words.
//! assert_eq!(grid.overlap(slots[0], slots[1]), Some((1, 1)));
//! ```

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::types::{Direction, Slot};

/// A structural problem with the supplied grid, reported before any solver
/// is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// A row's cell count differs from the first row's.
    RaggedRow { row: usize, expected: usize, found: usize },
    /// A pattern character other than `.` or `#`.
    UnknownCell { row: usize, col: usize, ch: char },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GridError::RaggedRow { row, expected, found } => {
                write!(f, "row {} has {} cells, expected {}", row, found, expected)
            }
            GridError::UnknownCell { row, col, ch } => {
                write!(f, "unrecognized cell {:?} at ({}, {})", ch, row, col)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Immutable puzzle geometry: dimensions, fillable cells, slots, overlaps.
///
/// Built once from a matrix or pattern; read-only thereafter. Slot identity
/// is structural (see [`Slot`]), so the overlap and neighbor tables are keyed
/// directly by slot values.
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<bool>,
    slots: Vec<Slot>,
    overlaps: HashMap<(Slot, Slot), (usize, usize)>,
    neighbors: HashMap<Slot, Vec<Slot>>,
}

impl Grid {
    /// Builds a grid from a row-major boolean matrix (`true` = fillable).
    ///
    /// All rows must have the same length as the first; a ragged row is a
    /// structural error. An empty matrix is fine and yields no slots.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(height * width);
        for (row, r) in rows.iter().enumerate() {
            if r.len() != width {
                return Err(GridError::RaggedRow { row, expected: width, found: r.len() });
            }
            cells.extend_from_slice(r);
        }
        Ok(Self::build(height, width, cells))
    }

    /// Builds a grid from a pattern string: `.` = fillable, `#` = blocked,
    /// one row per line. Leading and trailing newlines are ignored, which
    /// keeps multi-line string literals readable.
    pub fn from_pattern(pattern: &str) -> Result<Self, GridError> {
        let mut rows = Vec::new();
        for (row, line) in pattern.trim_matches('\n').lines().enumerate() {
            let mut cells = Vec::with_capacity(line.len());
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '.' => cells.push(true),
                    '#' => cells.push(false),
                    _ => return Err(GridError::UnknownCell { row, col, ch }),
                }
            }
            rows.push(cells);
        }
        Self::from_rows(rows)
    }

    fn build(height: usize, width: usize, cells: Vec<bool>) -> Self {
        let open = |row: usize, col: usize| cells[row * width + col];

        let mut slots = Vec::new();
        for row in 0..height {
            let mut start = None;
            for col in 0..=width {
                let fillable = col < width && open(row, col);
                match (fillable, start) {
                    (true, None) => start = Some(col),
                    (false, Some(s)) => {
                        if col - s >= 2 {
                            slots.push(Slot::new(row, s, Direction::Across, col - s));
                        }
                        start = None;
                    }
                    _ => {}
                }
            }
        }
        for col in 0..width {
            let mut start = None;
            for row in 0..=height {
                let fillable = row < height && open(row, col);
                match (fillable, start) {
                    (true, None) => start = Some(row),
                    (false, Some(s)) => {
                        if row - s >= 2 {
                            slots.push(Slot::new(s, col, Direction::Down, row - s));
                        }
                        start = None;
                    }
                    _ => {}
                }
            }
        }

        let mut overlaps = HashMap::new();
        let mut neighbors: HashMap<Slot, Vec<Slot>> = slots.iter().map(|&s| (s, Vec::new())).collect();
        for (i, &a) in slots.iter().enumerate() {
            for &b in &slots[i + 1..] {
                if let Some((pa, pb)) = Self::crossing(a, b) {
                    overlaps.insert((a, b), (pa, pb));
                    overlaps.insert((b, a), (pb, pa));
                    neighbors.entry(a).or_default().push(b);
                    neighbors.entry(b).or_default().push(a);
                }
            }
        }

        debug!("grid {}x{}: {} slots, {} crossings", height, width, slots.len(), overlaps.len() / 2);
        Grid { height, width, cells, slots, overlaps, neighbors }
    }

    /// Computes the shared cell of two slots as per-slot character offsets.
    ///
    /// Slots of the same orientation never cross: maximal runs in the same
    /// row or column cannot touch. Perpendicular straight runs share at most
    /// one cell, so a single arithmetic check suffices.
    fn crossing(a: Slot, b: Slot) -> Option<(usize, usize)> {
        if a.direction() == b.direction() {
            return None;
        }
        let (across, down) = match a.direction() {
            Direction::Across => (a, b),
            Direction::Down => (b, a),
        };
        let row = across.row();
        let col = down.col();
        let hits = (across.col()..across.col() + across.length()).contains(&col)
            && (down.row()..down.row() + down.length()).contains(&row);
        if !hits {
            return None;
        }
        let at_across = col - across.col();
        let at_down = row - down.row();
        match a.direction() {
            Direction::Across => Some((at_across, at_down)),
            Direction::Down => Some((at_down, at_across)),
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the cell at `(row, col)` is fillable. Out-of-range cells are
    /// not.
    pub fn is_fillable(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    /// All slots, in scan order (across row-major, then down column-major).
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The overlap between two slots: `Some((px, py))` means character `px`
    /// of x's word must equal character `py` of y's word. Symmetric with
    /// swapped indices; `None` when the slots share no cell.
    pub fn overlap(&self, x: Slot, y: Slot) -> Option<(usize, usize)> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// Slots sharing a cell with `x`, in scan order.
    pub fn neighbors(&self, x: Slot) -> &[Slot] {
        self.neighbors.get(&x).map_or(&[], Vec::as_slice)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("height", &self.height)
            .field("width", &self.width)
            .field("slots", &self.slots.len())
            .field("crossings", &(self.overlaps.len() / 2))
            .finish()
    }
}
