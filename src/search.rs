//! Heuristic backtracking search.
//!
//! The search extends a partial [`Assignment`] one slot at a time, depth
//! first. Slot choice follows minimum-remaining-values with a degree
//! tie-break; value order follows least-constraining-value. Every tentative
//! extension must pass the consistency check before recursing, so a complete
//! assignment is a solution by construction.
//!
//! Dead ends are ordinary values: a branch that exhausts its candidates
//! reports [`Step::Exhausted`] and the caller tries its next candidate.
//! Only the top-level caller turns an exhausted root into "no solution".

use log::debug;

use crate::solver::{Assignment, SolveOptions, Solver};
use crate::types::{Slot, WordId};

/// Outcome of one backtracking call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    /// The assignment became complete; it is the solution.
    Solution,
    /// Every candidate failed down this branch.
    Exhausted,
    /// The node budget ran out somewhere below.
    Aborted,
}

impl Solver<'_> {
    /// Picks the unassigned slot to try next: smallest domain first
    /// (minimum remaining values), ties broken by most neighbors (degree),
    /// remaining ties by slot scan order. `None` when every slot is
    /// assigned.
    pub fn select_unassigned_slot(&self, assignment: &Assignment) -> Option<Slot> {
        let mut best: Option<(Slot, usize, usize)> = None;
        for &slot in self.grid.slots() {
            if assignment.contains(slot) {
                continue;
            }
            let size = self.domain(slot).len();
            let degree = self.grid.neighbors(slot).len();
            let better = match best {
                None => true,
                Some((_, best_size, best_degree)) => {
                    size < best_size || (size == best_size && degree > best_degree)
                }
            };
            if better {
                best = Some((slot, size, degree));
            }
        }
        best.map(|(slot, _, _)| slot)
    }

    /// Orders `slot`'s candidates least-constraining first: each candidate
    /// is ranked by how many words it would eliminate from the domains of
    /// *unassigned* neighbors (a neighbor word is eliminated when the
    /// crossing characters differ). The sort is stable, so equal ranks keep
    /// domain order.
    pub fn order_domain_values(&self, slot: Slot, assignment: &Assignment) -> Vec<WordId> {
        let words = self.words;
        let mut ranked: Vec<(WordId, usize)> = self.domain(slot).iter().map(|&w| (w, 0)).collect();
        for &neighbor in self.grid.neighbors(slot) {
            if assignment.contains(neighbor) {
                continue;
            }
            let Some((p, pn)) = self.grid.overlap(slot, neighbor) else {
                continue;
            };
            for (w, eliminated) in ranked.iter_mut() {
                let c = words.char_at(*w, p);
                *eliminated += self
                    .domain(neighbor)
                    .iter()
                    .filter(|&&other| words.char_at(other, pn) != c)
                    .count();
            }
        }
        ranked.sort_by_key(|&(_, eliminated)| eliminated);
        ranked.into_iter().map(|(w, _)| w).collect()
    }

    /// One depth-first step: assign the selected slot every plausible word
    /// in turn, recursing on each consistent extension and undoing it when
    /// the branch below exhausts.
    pub(crate) fn backtrack(&mut self, assignment: &mut Assignment, options: &SolveOptions) -> Step {
        self.stats.states += 1;
        if let Some(budget) = options.node_budget {
            if self.stats.states > budget {
                debug!("backtrack: node budget {} exhausted", budget);
                return Step::Aborted;
            }
        }

        let Some(slot) = self.select_unassigned_slot(assignment) else {
            // Nothing left to assign: every extension passed the consistency
            // check on the way down, so this is the solution.
            return Step::Solution;
        };

        for word in self.order_domain_values(slot, assignment) {
            assignment.insert(slot, word);
            if !self.consistent(assignment) {
                assignment.remove(slot);
                continue;
            }
            debug!("assign {} = {}", slot, self.words.text(word));

            let mut snapshot = None;
            let mut viable = true;
            if options.maintain_arc_consistency {
                snapshot = Some(self.domains.clone());
                if let Err(failure) = self.propagate_choice(slot, word) {
                    debug!("reject {} = {}: {}", slot, self.words.text(word), failure);
                    viable = false;
                }
            }

            if viable {
                match self.backtrack(assignment, options) {
                    Step::Solution => return Step::Solution,
                    Step::Aborted => return Step::Aborted,
                    Step::Exhausted => {}
                }
            }

            if let Some(saved) = snapshot {
                self.domains = saved;
            }
            assignment.remove(slot);
        }

        debug!("backtrack from {}", slot);
        self.stats.backtracks += 1;
        Step::Exhausted
    }
}
