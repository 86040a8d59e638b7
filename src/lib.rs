//! # crossfill: Constraint-Based Crossword Filling
//!
//! **`crossfill`** is a deterministic, manager-centric library for filling crossword grids from a word list.
//! It models the puzzle as a **constraint satisfaction problem (CSP)** and solves it with classic AI search:
//! constraint propagation first, heuristic backtracking second.
//!
//! ## The Crossword as a CSP
//!
//! Every maximal run of two or more fillable cells, across or down, is a *slot* (a variable).
//! A slot's *domain* is the set of words that might fill it. Two slots that share a cell *overlap*,
//! and the overlap pins a pair of character positions that must agree. Add the rules that every
//! word is used at most once and that a word must exactly fit its slot, and filling the grid
//! means finding one complete, consistent assignment.
//!
//! ## Key Features
//!
//! - **Manager-Centric Architecture**: All solving goes through the [`Solver`][crate::solver::Solver] manager,
//!   which borrows an immutable [`Grid`][crate::grid::Grid] and [`WordList`][crate::words::WordList] and owns
//!   the mutable per-slot domains.
//! - **Constraint Propagation**: Node consistency discards wrong-length words up front; AC-3 then prunes
//!   every word with no compatible crossing partner, often before any search happens.
//! - **Informed Search**: Backtracking picks slots by minimum remaining values with a degree tie-break,
//!   and tries words least-constraining first.
//! - **Failure Is a Value**: An unsolvable puzzle is a normal answer ([`SolveOutcome::NoSolution`][crate::solver::SolveOutcome]),
//!   not an error. Errors are reserved for malformed inputs.
//! - **Deterministic**: The same grid and word list always produce the same solution, the same
//!   statistics, and the same diagnostics.
//!
//! ## Quick Start
//!
//! Add `crossfill` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! crossfill = "0.1"
//! ```
//!
//! ## Basic Usage
//!
//! ```rust
//! use crossfill::grid::Grid;
//! use crossfill::solver::Solver;
//! use crossfill::words::WordList;
//!
//! // 1. Describe the blank grid ('.' fillable, '#' blocked)
//! let grid = Grid::from_pattern("#.#\n...\n#.#").unwrap();
//!
//! // 2. Gather the vocabulary
//! let words = WordList::new(["CAT", "TAP", "DOG"]);
//!
//! // 3. Solve
//! let mut solver = Solver::new(&grid, &words);
//! let solution = solver.solve().unwrap();
//!
//! // 4. Read the fill (slots are ordered across-first, row-major)
//! let across = grid.slots()[0];
//! let down = grid.slots()[1];
//! assert_eq!(words.text(solution.get(across).unwrap()), "CAT");
//! assert_eq!(words.text(solution.get(down).unwrap()), "TAP");
//! ```
//!
//! ## Core Components
//!
//! - **[`grid`]**: Puzzle geometry. Derives slots, overlaps, and neighbors from a cell mask.
//! - **[`words`]**: The interned word list; everything downstream works with cheap [`WordId`][crate::types::WordId]s.
//! - **[`solver`]**: The [`Solver`][crate::solver::Solver] manager, solve options, outcomes, and statistics.
//! - **[`propagate`]**: Node consistency and the AC-3 algorithm.
//! - **[`search`]**: The heuristic backtracking search.
//!
//! For the fine print on slot extraction, see the [`grid`] module documentation.

pub mod check;
pub mod grid;
pub mod propagate;
pub mod search;
pub mod solver;
pub mod types;
pub mod words;
