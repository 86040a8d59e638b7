//! Constraint propagation: node consistency and the AC-3 arc engine.
//!
//! Propagation only ever shrinks domains. The unary pass
//! ([`enforce_node_consistency`][Solver::enforce_node_consistency]) drops
//! words whose length cannot fit a slot; the binary pass ([`ac3`][Solver::ac3])
//! drops words with no compatible partner across an overlap, cascading until
//! a fixpoint. A domain wiped to empty ends propagation immediately with a
//! [`PropagationFailure`], a recoverable control-flow value rather than an
//! abort: the top-level solve maps it to "no solution", and a search branch
//! maps it to a rejected candidate.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use log::debug;

use crate::solver::Solver;
use crate::types::{Slot, WordId};

/// Why a propagation pass gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationFailure {
    /// The word list holds no word of this slot's length. Detected by node
    /// consistency, before any arcs are processed.
    NoLengthMatch { slot: Slot },
    /// Arc revision removed the last candidate of this slot.
    EmptyDomain { slot: Slot },
}

impl fmt::Display for PropagationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PropagationFailure::NoLengthMatch { slot } => {
                write!(f, "no word of length {} fits slot {}", slot.length(), slot)
            }
            PropagationFailure::EmptyDomain { slot } => {
                write!(f, "slot {} has no remaining candidates", slot)
            }
        }
    }
}

impl std::error::Error for PropagationFailure {}

impl Solver<'_> {
    /// Removes from every domain the words whose length differs from the
    /// slot's. Runs once, before any arc consistency.
    pub fn enforce_node_consistency(&mut self) -> Result<(), PropagationFailure> {
        let words = self.words;
        let mut removed = 0u64;
        for (&slot, domain) in self.domains.iter_mut() {
            let before = domain.len();
            domain.retain(|&w| words.length(w) == slot.length());
            removed += (before - domain.len()) as u64;
        }
        self.stats.eliminations += removed;
        debug!("node consistency: removed {} candidates", removed);

        for &slot in self.grid.slots() {
            if self.domain(slot).is_empty() {
                return Err(PropagationFailure::NoLengthMatch { slot });
            }
        }
        Ok(())
    }

    /// Makes `x` arc-consistent with `y`: removes every word of `x` that no
    /// word of `y` supports at their overlap. Returns whether anything was
    /// removed; slots without an overlap are a no-op.
    ///
    /// Support is checked against the set of `y`-side characters at the
    /// overlap position, which is equivalent to scanning all pairs. Requires
    /// node-consistent domains (overlap positions index words of the slot's
    /// exact length).
    pub fn revise(&mut self, x: Slot, y: Slot) -> bool {
        let Some((px, py)) = self.grid.overlap(x, y) else {
            return false;
        };
        let words = self.words;
        let support: HashSet<char> = self.domain(y).iter().map(|&w| words.char_at(w, py)).collect();

        let Some(domain) = self.domains.get_mut(&x) else {
            return false;
        };
        let before = domain.len();
        domain.retain(|&w| support.contains(&words.char_at(w, px)));
        let removed = before - domain.len();
        if removed > 0 {
            self.stats.eliminations += removed as u64;
            debug!("revise({}, {}): removed {} candidates", x, y, removed);
        }
        removed > 0
    }

    /// Enforces arc consistency across the whole puzzle.
    ///
    /// Seeds a FIFO queue with every ordered pair of crossing slots (pairs
    /// without an overlap would be no-op revisions) and processes arcs until
    /// the queue drains. Whenever a revision shrinks `x`, every arc `(z, x)`
    /// for neighbors `z` other than the just-checked `y` is re-enqueued,
    /// since `x`'s smaller domain may have invalidated `z`'s support.
    ///
    /// Terminates because domains are finite and only shrink. Fails fast the
    /// moment a domain empties.
    pub fn ac3(&mut self) -> Result<(), PropagationFailure> {
        let mut queue = VecDeque::new();
        for &x in self.grid.slots() {
            for &y in self.grid.neighbors(x) {
                queue.push_back((x, y));
            }
        }
        debug!("ac3: seeded {} arcs", queue.len());
        self.run_ac3(queue)
    }

    /// Arc consistency from a caller-supplied arc list, for re-propagating
    /// after a local change without re-seeding the whole puzzle.
    pub fn ac3_seeded(&mut self, arcs: impl IntoIterator<Item = (Slot, Slot)>) -> Result<(), PropagationFailure> {
        self.run_ac3(arcs.into_iter().collect())
    }

    fn run_ac3(&mut self, mut queue: VecDeque<(Slot, Slot)>) -> Result<(), PropagationFailure> {
        while let Some((x, y)) = queue.pop_front() {
            self.stats.revisions += 1;
            if self.revise(x, y) {
                if self.domain(x).is_empty() {
                    debug!("ac3: slot {} wiped out", x);
                    return Err(PropagationFailure::EmptyDomain { slot: x });
                }
                for &z in self.grid.neighbors(x) {
                    if z != y {
                        queue.push_back((z, x));
                    }
                }
            }
        }
        Ok(())
    }

    /// Narrows `slot` to the single chosen `word` and re-propagates toward
    /// its neighbors. Used by the search when maintaining arc consistency.
    pub(crate) fn propagate_choice(&mut self, slot: Slot, word: WordId) -> Result<(), PropagationFailure> {
        if let Some(domain) = self.domains.get_mut(&slot) {
            domain.clear();
            domain.push(word);
        }
        self.ac3_seeded(self.grid.neighbors(slot).iter().map(|&z| (z, slot)))
    }
}
