//! Assignment validation: completeness and consistency.
//!
//! Pure queries over an [`Assignment`]; nothing here mutates the solver.
//! The search calls [`consistent`][Solver::consistent] after every tentative
//! extension, and callers can re-run it independently to audit a returned
//! solution.

use std::collections::HashSet;

use crate::solver::{Assignment, Solver};

impl Solver<'_> {
    /// Whether every slot of the puzzle has an assigned word.
    pub fn assignment_complete(&self, assignment: &Assignment) -> bool {
        self.grid.slots().iter().all(|&slot| assignment.contains(slot))
    }

    /// Whether the assignment violates no constraint: assigned words are
    /// pairwise distinct, each matches its slot's length, and every pair of
    /// assigned crossing slots agrees on the shared character. Unassigned
    /// slots impose nothing.
    pub fn consistent(&self, assignment: &Assignment) -> bool {
        let mut seen = HashSet::new();
        for (slot, word) in assignment.iter() {
            if !seen.insert(word) {
                return false;
            }
            if self.words.length(word) != slot.length() {
                return false;
            }
        }
        // Lengths are all correct past this point, so overlap positions are
        // in range for both words.
        for (slot, word) in assignment.iter() {
            for &neighbor in self.grid.neighbors(slot) {
                let Some(other) = assignment.get(neighbor) else {
                    continue;
                };
                let Some((p, pn)) = self.grid.overlap(slot, neighbor) else {
                    continue;
                };
                if self.words.char_at(word, p) != self.words.char_at(other, pn) {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::words::WordList;

    fn plus() -> Grid {
        Grid::from_pattern("#.#\n...\n#.#").unwrap()
    }

    #[test]
    fn test_empty_assignment_is_consistent_but_incomplete() {
        let grid = plus();
        let words = WordList::new(["CAT"]);
        let solver = Solver::new(&grid, &words);

        let assignment = Assignment::new();
        assert!(solver.consistent(&assignment));
        assert!(!solver.assignment_complete(&assignment));
    }

    #[test]
    fn test_partial_assignment_ignores_unassigned_neighbors() {
        let grid = plus();
        let words = WordList::new(["CAT"]);
        let solver = Solver::new(&grid, &words);

        let mut assignment = Assignment::new();
        assignment.insert(grid.slots()[0], words.id_of("CAT").unwrap());
        assert!(solver.consistent(&assignment));
        assert!(!solver.assignment_complete(&assignment));
    }

    #[test]
    fn test_matching_crossing_is_consistent_and_complete() {
        let grid = plus();
        let words = WordList::new(["CAT", "TAP"]);
        let solver = Solver::new(&grid, &words);

        let mut assignment = Assignment::new();
        assignment.insert(grid.slots()[0], words.id_of("CAT").unwrap());
        assignment.insert(grid.slots()[1], words.id_of("TAP").unwrap());
        assert!(solver.consistent(&assignment));
        assert!(solver.assignment_complete(&assignment));
    }

    #[test]
    fn test_mismatched_crossing_is_inconsistent() {
        let grid = plus();
        let words = WordList::new(["CAT", "DOG"]);
        let solver = Solver::new(&grid, &words);

        // CAT crosses with 'A', DOG with 'O'.
        let mut assignment = Assignment::new();
        assignment.insert(grid.slots()[0], words.id_of("CAT").unwrap());
        assignment.insert(grid.slots()[1], words.id_of("DOG").unwrap());
        assert!(!solver.consistent(&assignment));
    }

    #[test]
    fn test_duplicate_words_are_inconsistent() {
        // Two disjoint slots may not reuse one word, even without overlaps.
        let grid = Grid::from_pattern("..#..").unwrap();
        let words = WordList::new(["AT"]);
        let solver = Solver::new(&grid, &words);

        let at = words.id_of("AT").unwrap();
        let mut assignment = Assignment::new();
        assignment.insert(grid.slots()[0], at);
        assert!(solver.consistent(&assignment));
        assignment.insert(grid.slots()[1], at);
        assert!(!solver.consistent(&assignment));
    }

    #[test]
    fn test_wrong_length_is_inconsistent() {
        let grid = plus();
        let words = WordList::new(["AT", "CAT"]);
        let solver = Solver::new(&grid, &words);

        let mut assignment = Assignment::new();
        assignment.insert(grid.slots()[0], words.id_of("AT").unwrap());
        assert!(!solver.consistent(&assignment));
    }

    #[test]
    fn test_wrong_length_neighbor_does_not_panic() {
        // A malformed entry next to a correct one must simply read as
        // inconsistent.
        let grid = plus();
        let words = WordList::new(["CAT", "AT"]);
        let solver = Solver::new(&grid, &words);

        let mut assignment = Assignment::new();
        assignment.insert(grid.slots()[0], words.id_of("CAT").unwrap());
        assignment.insert(grid.slots()[1], words.id_of("AT").unwrap());
        assert!(!solver.consistent(&assignment));
    }
}
