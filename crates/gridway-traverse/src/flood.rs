//! Unweighted frontier-by-frontier flood fill (BFS).

use gridway_core::{Grid, Topology};

use crate::error::TraverseError;
use crate::ledger::Ledger;
use crate::state::{State, Transition};

/// Outcome of a [`flood_fill`] run.
#[derive(Debug, Clone)]
pub struct FloodResult<S> {
    /// Every state visited, with the round it was first reached, in
    /// discovery order. Seeds are round 0.
    pub visited: Vec<(S, u32)>,
    /// States first reached on the final counted round (the seeds when no
    /// round made progress).
    pub frontier: Vec<S>,
    /// Rounds that discovered at least one new state. May be less than the
    /// requested budget when expansion exhausts early; a round that
    /// discovers nothing is not counted.
    pub rounds: u32,
}

impl<S> FloodResult<S> {
    /// Total number of distinct states reached, seeds included.
    pub fn reached(&self) -> usize {
        self.visited.len()
    }

    /// Size of the final frontier.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// The largest first-seen round — the distance of the furthest state.
    pub fn max_round(&self) -> u32 {
        self.visited.iter().map(|&(_, r)| r).max().unwrap_or(0)
    }

    /// Number of states a walker could occupy after exactly `steps` steps
    /// when stepping back over visited ground is allowed.
    ///
    /// On bipartite transition graphs (any orthogonal grid walk) a state
    /// is occupiable at step `n` iff its first-seen round is at most `n`
    /// and has the same parity. Requires the fill to have run at least
    /// `steps` rounds, or to exhaustion.
    pub fn reachable_in_exactly(&self, steps: u32) -> usize {
        self.visited
            .iter()
            .filter(|&&(_, r)| r <= steps && r % 2 == steps % 2)
            .count()
    }
}

/// Breadth-first expansion from `seeds` under `transition`.
///
/// Each round replaces the frontier with the not-yet-visited successors of
/// the current frontier. `rounds` of `None` runs until no new states turn
/// up; `Some(n)` runs at most `n` rounds — the stopping condition is the
/// round count, not queue exhaustion. A state with no successors is simply
/// not re-enqueued.
///
/// Fails with [`TraverseError::InvalidTransition`] if a seed or a
/// transition-produced successor lies off a bounded grid. Toroidal grids
/// accept any position; transitions on a torus are expected to emit
/// normalized positions (e.g. via [`Grid::neighbors4`]) so that
/// deduplication sees one state per cell.
pub fn flood_fill<T, S, X>(
    grid: &Grid<T>,
    seeds: &[S],
    transition: &X,
    rounds: Option<u32>,
) -> Result<FloodResult<S>, TraverseError>
where
    S: State,
    X: Transition<S>,
{
    let bounded = grid.topology() == Topology::Bounded;
    let mut ledger = Ledger::new();
    let mut visited = Vec::new();
    let mut frontier = Vec::new();

    for seed in seeds {
        if bounded && !grid.in_bounds(seed.pos()) {
            return Err(TraverseError::InvalidTransition { pos: seed.pos() });
        }
        if ledger.try_visit(seed.clone()) {
            visited.push((seed.clone(), 0));
            frontier.push(seed.clone());
        }
    }

    let mut round = 0u32;
    let mut next = Vec::new();
    let mut buf = Vec::new();

    while rounds.is_none_or(|budget| round < budget) {
        for s in &frontier {
            buf.clear();
            transition.successors(s, &mut buf);
            for succ in buf.drain(..) {
                if bounded && !grid.in_bounds(succ.pos()) {
                    return Err(TraverseError::InvalidTransition { pos: succ.pos() });
                }
                if ledger.try_visit(succ.clone()) {
                    visited.push((succ.clone(), round + 1));
                    next.push(succ);
                }
            }
        }
        if next.is_empty() {
            // The frontier keeps its last productive generation; an empty
            // round is not counted.
            break;
        }
        round += 1;
        frontier.clear();
        std::mem::swap(&mut frontier, &mut next);
    }

    log::debug!(
        "flood fill reached {} states in {} rounds ({} on final frontier)",
        visited.len(),
        round,
        frontier.len()
    );
    Ok(FloodResult {
        visited,
        frontier,
        rounds: round,
    })
}
