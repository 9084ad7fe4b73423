//! Visited-state tracking shared by all traversal strategies.
//!
//! A ledger is owned by exactly one traversal invocation and discarded at
//! its end; it never evicts. The state space is finite whenever states are
//! built from grid-bounded fields, which bounds ledger growth.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// A set of previously emitted traversal states.
#[derive(Debug, Clone, Default)]
pub struct Ledger<S> {
    seen: HashSet<S>,
}

impl<S: Eq + Hash> Ledger<S> {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// Record `s` if it has not been seen before. Returns `true` exactly
    /// on first insertion. O(1) amortized.
    #[inline]
    pub fn try_visit(&mut self, s: S) -> bool {
        self.seen.insert(s)
    }

    /// Whether `s` has been recorded.
    #[inline]
    pub fn contains(&self, s: &S) -> bool {
        self.seen.contains(s)
    }

    /// Number of recorded states.
    #[inline]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Iterate over recorded states in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.seen.iter()
    }
}

/// A map from traversal state to the best cost seen for that exact state.
#[derive(Debug, Clone, Default)]
pub struct CostLedger<S> {
    best: HashMap<S, u32>,
}

impl<S: Eq + Hash> CostLedger<S> {
    pub fn new() -> Self {
        Self {
            best: HashMap::new(),
        }
    }

    /// The best cost recorded for `s`, if any.
    #[inline]
    pub fn best(&self, s: &S) -> Option<u32> {
        self.best.get(s).copied()
    }

    /// Record `cost` for `s` only if it is strictly better than anything
    /// recorded before. Ties do not replace, preserving the stable
    /// ordering of the worklist.
    #[inline]
    pub fn try_improve(&mut self, s: S, cost: u32) -> bool {
        match self.best.entry(s) {
            Entry::Occupied(mut prev) => {
                if *prev.get() <= cost {
                    false
                } else {
                    *prev.get_mut() = cost;
                    true
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(cost);
                true
            }
        }
    }

    /// Number of states with a recorded cost.
    #[inline]
    pub fn len(&self) -> usize {
        self.best.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }
}
