//! The solver: domain store, options, outcomes, and orchestration.
//!
//! [`Solver`] is the manager everything else hangs off: it borrows the
//! immutable [`Grid`] and [`WordList`], owns the per-slot domains and the
//! run statistics, and exposes the propagation and search algorithms as
//! methods (implemented in [`propagate`][crate::propagate],
//! [`check`][crate::check], and [`search`][crate::search]).
//!
//! A solve runs the classic sequence: node consistency (unary length
//! filter), full AC-3, then heuristic backtracking search. Propagation
//! prunes the solver's domains in place, so a solver is a single-shot
//! object: build a fresh one to restart from the full word list.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use num_bigint::BigUint;

use crate::grid::Grid;
use crate::search::Step;
use crate::types::{Slot, WordId};
use crate::words::WordList;

/// A partial or complete mapping from slots to words.
///
/// Built incrementally by search; an entry lives exactly as long as the
/// branch that added it. Complete and consistent together make a solution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    entries: HashMap<Slot, WordId>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Assignment::default()
    }

    /// The word assigned to `slot`, if any.
    pub fn get(&self, slot: Slot) -> Option<WordId> {
        self.entries.get(&slot).copied()
    }

    /// Whether `slot` has an assigned word.
    pub fn contains(&self, slot: Slot) -> bool {
        self.entries.contains_key(&slot)
    }

    /// Assigns `word` to `slot`, replacing any previous entry.
    pub fn insert(&mut self, slot: Slot, word: WordId) {
        self.entries.insert(slot, word);
    }

    /// Removes the entry for `slot`, returning the word it held.
    pub fn remove(&mut self, slot: Slot) -> Option<WordId> {
        self.entries.remove(&slot)
    }

    /// Number of assigned slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no slot is assigned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(slot, word)` entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, WordId)> + '_ {
        self.entries.iter().map(|(&slot, &word)| (slot, word))
    }
}

/// Knobs for a solve run.
#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    pub(crate) maintain_arc_consistency: bool,
    pub(crate) node_budget: Option<u64>,
}

impl SolveOptions {
    pub fn new() -> Self {
        SolveOptions::default()
    }

    /// Re-establish arc consistency after every tentative assignment.
    ///
    /// Off by default: the base algorithm relies on the consistency check
    /// alone. Enabling this prunes neighbor domains inside the search at the
    /// cost of a domain-store clone per branch.
    pub fn with_arc_consistency(mut self, enabled: bool) -> Self {
        self.maintain_arc_consistency = enabled;
        self
    }

    /// Abort the search after visiting this many states.
    ///
    /// An exhausted budget surfaces as [`SolveOutcome::Aborted`], which is
    /// distinct from proving that no solution exists.
    pub fn with_node_budget(mut self, budget: u64) -> Self {
        self.node_budget = Some(budget);
        self
    }
}

/// The result of a bounded solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A complete, consistent assignment.
    Solved(Assignment),
    /// The search space is exhausted; the puzzle has no solution.
    NoSolution,
    /// The node budget ran out before the search finished.
    Aborted,
}

/// Counters accumulated over a solver's lifetime.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    /// Search states visited (calls into the backtracking step).
    pub states: u64,
    /// Dead ends that unwound one level.
    pub backtracks: u64,
    /// Arcs dequeued and revised by AC-3.
    pub revisions: u64,
    /// Words removed from domains by any propagation.
    pub eliminations: u64,
    /// Wall-clock time spent inside `solve_with`.
    pub duration: Duration,
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} states, {} backtracks, {} revisions, {} eliminations in {:.3} s",
            self.states,
            self.backtracks,
            self.revisions,
            self.eliminations,
            self.duration.as_secs_f64()
        )
    }
}

/// The crossword CSP solver.
///
/// Borrows the puzzle geometry and word list; owns the mutable domain store.
pub struct Solver<'a> {
    pub(crate) grid: &'a Grid,
    pub(crate) words: &'a WordList,
    pub(crate) domains: HashMap<Slot, Vec<WordId>>,
    pub(crate) stats: Statistics,
}

impl<'a> Solver<'a> {
    /// Creates a solver with every slot's domain set to the full word list.
    pub fn new(grid: &'a Grid, words: &'a WordList) -> Self {
        let all: Vec<WordId> = words.ids().collect();
        let domains = grid.slots().iter().map(|&slot| (slot, all.clone())).collect();
        Solver { grid, words, domains, stats: Statistics::default() }
    }

    /// The current domain of `slot`, in deterministic insertion order.
    pub fn domain(&self, slot: Slot) -> &[WordId] {
        self.domains.get(&slot).map_or(&[], Vec::as_slice)
    }

    /// Counters accumulated so far.
    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// The number of complete assignments the current domains admit,
    /// ignoring all constraints: the product of domain sizes.
    pub fn search_space(&self) -> BigUint {
        let mut total = BigUint::from(1u32);
        for &slot in self.grid.slots() {
            total *= BigUint::from(self.domain(slot).len());
        }
        total
    }

    /// Solves with default options. `None` means no solution exists.
    pub fn solve(&mut self) -> Option<Assignment> {
        match self.solve_with(&SolveOptions::default()) {
            SolveOutcome::Solved(assignment) => Some(assignment),
            _ => None,
        }
    }

    /// Solves with explicit options: node consistency, then full AC-3, then
    /// backtracking search.
    pub fn solve_with(&mut self, options: &SolveOptions) -> SolveOutcome {
        let start = Instant::now();
        let outcome = self.run(options);
        self.stats.duration += start.elapsed();
        match &outcome {
            SolveOutcome::Solved(_) => info!("solved: {}", self.stats),
            SolveOutcome::NoSolution => info!("no solution: {}", self.stats),
            SolveOutcome::Aborted => info!("aborted: {}", self.stats),
        }
        outcome
    }

    fn run(&mut self, options: &SolveOptions) -> SolveOutcome {
        debug!(
            "solve: {} slots, {} words, options = {:?}",
            self.grid.slots().len(),
            self.words.len(),
            options
        );

        if let Err(failure) = self.enforce_node_consistency() {
            warn!("{}", failure);
            return SolveOutcome::NoSolution;
        }
        if let Err(failure) = self.ac3() {
            warn!("{}", failure);
            return SolveOutcome::NoSolution;
        }
        debug!("propagation done, search space = {}", self.search_space());

        let mut assignment = Assignment::new();
        match self.backtrack(&mut assignment, options) {
            Step::Solution => SolveOutcome::Solved(assignment),
            Step::Exhausted => SolveOutcome::NoSolution,
            Step::Aborted => SolveOutcome::Aborted,
        }
    }
}

impl fmt::Debug for Solver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver")
            .field("slots", &self.grid.slots().len())
            .field("words", &self.words.len())
            .field("candidates", &self.domains.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn plus() -> Grid {
        Grid::from_pattern("#.#\n...\n#.#").unwrap()
    }

    #[test]
    fn test_initial_domains_hold_every_word() {
        let grid = plus();
        let words = WordList::new(["CAT", "DO", "TIP"]);
        let solver = Solver::new(&grid, &words);

        for &slot in grid.slots() {
            assert_eq!(solver.domain(slot).len(), 3);
        }
        println!("solver = {:?}", solver);
    }

    #[test]
    fn test_search_space_is_domain_product() {
        let grid = plus();
        let words = WordList::new(["CAT", "DOG", "TIP"]);
        let solver = Solver::new(&grid, &words);
        assert_eq!(solver.search_space(), BigUint::from(9u32));
    }

    #[test]
    fn test_assignment_entries() {
        let grid = plus();
        let words = WordList::new(["CAT", "TAP"]);
        let across = grid.slots()[0];
        let cat = words.id_of("CAT").unwrap();
        let tap = words.id_of("TAP").unwrap();

        let mut assignment = Assignment::new();
        assert!(assignment.is_empty());
        assignment.insert(across, cat);
        assert!(assignment.contains(across));
        assert_eq!(assignment.get(across), Some(cat));

        assignment.insert(across, tap);
        assert_eq!(assignment.get(across), Some(tap));
        assert_eq!(assignment.len(), 1);

        assert_eq!(assignment.remove(across), Some(tap));
        assert!(assignment.is_empty());
    }

    #[test]
    fn test_solve_plus_grid() {
        let grid = plus();
        let words = WordList::new(["CAT", "TAP", "DOG"]);
        let mut solver = Solver::new(&grid, &words);

        let solution = solver.solve().unwrap();
        let across = grid.slots()[0];
        let down = grid.slots()[1];

        // Deterministic: LCV ranks CAT and TAP (1 elimination each) before
        // DOG (2), and stable ordering keeps CAT first; the down slot then
        // rejects the duplicate CAT and takes TAP.
        assert_eq!(solution.get(across), words.id_of("CAT"));
        assert_eq!(solution.get(down), words.id_of("TAP"));
        println!("stats = {}", solver.statistics());
    }

    #[test]
    fn test_empty_grid_solves_trivially() {
        let grid = Grid::from_rows(vec![]).unwrap();
        let words = WordList::new(["AT"]);
        let mut solver = Solver::new(&grid, &words);

        let solution = solver.solve().unwrap();
        assert!(solution.is_empty());
    }

    #[test]
    fn test_options_builder() {
        let options = SolveOptions::new().with_arc_consistency(true).with_node_budget(64);
        assert!(options.maintain_arc_consistency);
        assert_eq!(options.node_budget, Some(64));
    }

    #[test]
    fn test_solve_single_slot() {
        let grid = Grid::from_pattern("..").unwrap();
        let words = WordList::new(["AT"]);
        let mut solver = Solver::new(&grid, &words);

        let solution = solver.solve().unwrap();
        assert_eq!(solution.get(grid.slots()[0]), words.id_of("AT"));
    }

    #[test]
    fn test_solve_corner_crossing() {
        // The across slot's last cell is the down slot's first: the words
        // must share that letter. Only CAT/TIP agree ('T' at positions 2
        // and 0).
        let grid = Grid::from_pattern("...\n##.\n##.").unwrap();
        let words = WordList::new(["CAT", "DOG", "TIP"]);
        let mut solver = Solver::new(&grid, &words);

        let solution = solver.solve().unwrap();
        assert_eq!(solution.get(grid.slots()[0]), words.id_of("CAT"));
        assert_eq!(solution.get(grid.slots()[1]), words.id_of("TIP"));
    }

    #[test]
    fn test_solve_incompatible_words_has_no_solution() {
        let grid = plus();
        // Every pairing clashes at the crossing or reuses a word.
        let words = WordList::new(["CAT", "DOG", "TIP"]);
        let mut solver = Solver::new(&grid, &words);

        assert_eq!(solver.solve_with(&SolveOptions::default()), SolveOutcome::NoSolution);
        println!("stats = {}", solver.statistics());
    }

    #[test]
    fn test_solve_never_reuses_a_word() {
        // Two disjoint slots, one word: the second slot has nothing left.
        let grid = Grid::from_pattern("..#..").unwrap();
        let words = WordList::new(["AT"]);
        let mut solver = Solver::new(&grid, &words);
        assert_eq!(solver.solve(), None);

        // A second word makes it fillable again.
        let words = WordList::new(["AT", "TO"]);
        let mut solver = Solver::new(&grid, &words);
        let solution = solver.solve().unwrap();
        assert_eq!(solution.get(grid.slots()[0]), words.id_of("AT"));
        assert_eq!(solution.get(grid.slots()[1]), words.id_of("TO"));
    }

    #[test]
    fn test_solve_reports_wipeout_before_search() {
        // The across slot crosses the down slot at their first cells, but
        // no 2-letter word starts with 'D'. AC-3 empties the across domain
        // and the search never starts.
        let grid = Grid::from_pattern("..\n.#\n.#").unwrap();
        let words = WordList::new(["AT", "DOG", "DIG"]);
        let mut solver = Solver::new(&grid, &words);

        assert_eq!(solver.solve_with(&SolveOptions::default()), SolveOutcome::NoSolution);
        assert_eq!(solver.statistics().states, 0);
    }

    #[test]
    fn test_solve_without_length_match_is_no_solution() {
        let grid = plus();
        let words = WordList::new(["AT", "TO"]);
        let mut solver = Solver::new(&grid, &words);

        assert_eq!(solver.solve_with(&SolveOptions::default()), SolveOutcome::NoSolution);
        assert_eq!(solver.statistics().states, 0);
    }

    #[test]
    fn test_solve_budget_abort_is_not_no_solution() {
        let grid = plus();
        let words = WordList::new(["CAT", "TAP", "DOG"]);

        let mut solver = Solver::new(&grid, &words);
        let outcome = solver.solve_with(&SolveOptions::new().with_node_budget(0));
        assert_eq!(outcome, SolveOutcome::Aborted);

        // The same puzzle solves once the budget allows it.
        let mut solver = Solver::new(&grid, &words);
        let outcome = solver.solve_with(&SolveOptions::new().with_node_budget(100));
        assert!(matches!(outcome, SolveOutcome::Solved(_)));
    }

    /// Exhaustively enumerates complete assignments, pruning with the same
    /// consistency check the solver uses.
    fn solvable_by_enumeration(grid: &Grid, words: &WordList) -> bool {
        fn extend(
            solver: &Solver<'_>,
            grid: &Grid,
            words: &WordList,
            assignment: &mut Assignment,
            depth: usize,
        ) -> bool {
            if depth == grid.slots().len() {
                return solver.assignment_complete(assignment) && solver.consistent(assignment);
            }
            let slot = grid.slots()[depth];
            for id in words.ids() {
                if words.length(id) != slot.length() {
                    continue;
                }
                assignment.insert(slot, id);
                if solver.consistent(assignment) && extend(solver, grid, words, assignment, depth + 1) {
                    return true;
                }
                assignment.remove(slot);
            }
            false
        }

        let solver = Solver::new(grid, words);
        let mut assignment = Assignment::new();
        extend(&solver, grid, words, &mut assignment, 0)
    }

    #[test]
    fn test_solve_agrees_with_enumeration() {
        let fixtures: Vec<(&str, Vec<&str>)> = vec![
            ("#.#\n...\n#.#", vec!["CAT", "TAP", "DOG"]),
            ("#.#\n...\n#.#", vec!["CAT", "DOG", "TIP"]),
            ("..#..", vec!["AT"]),
            ("..#..", vec!["AT", "TO"]),
            ("..\n.#\n.#", vec!["AT", "DOG", "DIG"]),
            ("..\n.#\n.#", vec!["DO", "DOG", "DIG"]),
            ("...\n...\n...", vec!["BIT", "ONE", "ANT", "BOA", "INN", "TET"]),
            ("...\n...\n...", vec!["BIT", "ONE", "ANT", "BOA", "INN"]),
        ];

        for (pattern, list) in fixtures {
            println!("pattern:\n{}", pattern);
            let grid = Grid::from_pattern(pattern).unwrap();
            let words = WordList::new(list);
            let expected = solvable_by_enumeration(&grid, &words);
            println!("expected solvable = {}", expected);

            let mut solver = Solver::new(&grid, &words);
            let solution = solver.solve();
            assert_eq!(solution.is_some(), expected);
            if let Some(solution) = &solution {
                let checker = Solver::new(&grid, &words);
                assert!(checker.assignment_complete(solution));
                assert!(checker.consistent(solution));
            }

            // Propagating inside the search must not change solvability.
            let mut solver = Solver::new(&grid, &words);
            let outcome = solver.solve_with(&SolveOptions::new().with_arc_consistency(true));
            assert_eq!(matches!(outcome, SolveOutcome::Solved(_)), expected);
        }
    }
}
