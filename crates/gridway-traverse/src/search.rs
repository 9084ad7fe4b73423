//! Cost-ordered search with constraint-augmented state.

use std::collections::BinaryHeap;

use gridway_core::{Direction, Grid, Point, Topology};

use crate::error::TraverseError;
use crate::ledger::CostLedger;
use crate::state::{State, Steer, Transition};

// ---------------------------------------------------------------------------
// Heap entry
// ---------------------------------------------------------------------------

/// Worklist entry: a state with its accumulated cost and an insertion
/// sequence number for deterministic tie-breaking.
struct Entry<S> {
    cost: u32,
    seq: u64,
    state: S,
}

impl<S> PartialEq for Entry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}

impl<S> Eq for Entry<S> {}

impl<S> Ord for Entry<S> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops the cheapest, oldest entry.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<S> PartialOrd for Entry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Shortest path
// ---------------------------------------------------------------------------

/// Minimum accumulated cost from any seed to any goal position.
///
/// Seeds start at cost 0; every accepted move adds `cost_of(destination)`,
/// so a seed's own cell cost is never counted. Dedup is per full state,
/// letting the same tile carry different headings and run counts.
///
/// The first time a goal position is popped its cost is optimal for that
/// state; the search keeps draining until the next pop would exceed the
/// best arrival and returns the minimum over all goal arrivals, which also
/// covers multi-seed worklists.
///
/// Fails with [`TraverseError::NoPathFound`] when the worklist empties
/// without a goal arrival, and [`TraverseError::InvalidTransition`] if a
/// seed or successor lies off a bounded grid.
pub fn shortest_path<T, S, X, C, G>(
    grid: &Grid<T>,
    seeds: &[S],
    transition: &X,
    cost_of: C,
    is_goal: G,
) -> Result<u32, TraverseError>
where
    S: State,
    X: Transition<S>,
    C: Fn(Point) -> u32,
    G: Fn(Point) -> bool,
{
    let bounded = grid.topology() == Topology::Bounded;
    let mut ledger = CostLedger::new();
    let mut open = BinaryHeap::new();
    let mut seq = 0u64;

    for seed in seeds {
        if bounded && !grid.in_bounds(seed.pos()) {
            return Err(TraverseError::InvalidTransition { pos: seed.pos() });
        }
        if ledger.try_improve(seed.clone(), 0) {
            open.push(Entry {
                cost: 0,
                seq,
                state: seed.clone(),
            });
            seq += 1;
        }
    }

    let mut best_goal: Option<u32> = None;
    let mut expanded = 0usize;
    let mut buf = Vec::new();

    while let Some(Entry { cost, state, .. }) = open.pop() {
        // Stale entry: a cheaper route to this state was found after it
        // was pushed.
        if ledger.best(&state).is_some_and(|b| b < cost) {
            continue;
        }
        // Every remaining entry costs at least as much as this one.
        if best_goal.is_some_and(|b| cost > b) {
            break;
        }
        if is_goal(state.pos()) {
            best_goal = Some(best_goal.map_or(cost, |b| b.min(cost)));
            continue;
        }
        expanded += 1;

        buf.clear();
        transition.successors(&state, &mut buf);
        for succ in buf.drain(..) {
            if bounded && !grid.in_bounds(succ.pos()) {
                return Err(TraverseError::InvalidTransition { pos: succ.pos() });
            }
            let next_cost = cost + cost_of(succ.pos());
            if ledger.try_improve(succ.clone(), next_cost) {
                open.push(Entry {
                    cost: next_cost,
                    seq,
                    state: succ,
                });
                seq += 1;
            }
        }
    }

    log::debug!(
        "shortest path expanded {expanded} states, {} recorded, best {best_goal:?}",
        ledger.len()
    );
    best_goal.ok_or(TraverseError::NoPathFound)
}

// ---------------------------------------------------------------------------
// Steering rules
// ---------------------------------------------------------------------------

/// [`Transition`] over [`Steer`] states enforcing turn constraints:
/// reversing is always forbidden, and continuing straight is forbidden
/// once the consecutive-move run reaches `max_straight`.
pub struct Steering<'g, T> {
    grid: &'g Grid<T>,
    max_straight: u8,
}

/// Build the constrained-movement transition for a grid.
pub fn steering<T>(grid: &Grid<T>, max_straight: u8) -> Steering<'_, T> {
    Steering { grid, max_straight }
}

impl<T> Transition<Steer> for Steering<'_, T> {
    fn successors(&self, s: &Steer, buf: &mut Vec<Steer>) {
        for dir in Direction::ALL {
            if dir == s.dir.opposite() {
                continue;
            }
            let run = if dir == s.dir { s.run + 1 } else { 1 };
            if run > self.max_straight {
                continue;
            }
            // Normalized so toroidal wrap-arounds land on the canonical
            // cell; off a bounded grid there is no move.
            let Some(pos) = self.grid.normalize(s.pos + dir.delta()) else {
                continue;
            };
            buf.push(Steer::new(pos, dir, run));
        }
    }
}

/// Minimum-cost route across a per-cell cost grid under steering
/// constraints, from `start` to `goal`.
///
/// All four initial headings are seeded with a run of zero; the no-reverse
/// rule applies only from the first move onward.
pub fn min_cost_path(
    grid: &Grid<u32>,
    start: Point,
    goal: Point,
    max_straight: u8,
) -> Result<u32, TraverseError> {
    let seeds: Vec<Steer> = Direction::ALL
        .into_iter()
        .map(|dir| Steer::new(start, dir, 0))
        .collect();
    shortest_path(
        grid,
        &seeds,
        &steering(grid, max_straight),
        |p| grid[p],
        |p| p == goal,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn costs(text: &str) -> Grid<u32> {
        Grid::from_lines(text.lines(), |c| c.to_digit(10)).unwrap()
    }

    #[test]
    fn corner_to_corner_on_unit_grid() {
        let grid = costs("11\n11");
        // Only L-shaped routes exist; the start cell's cost is not counted.
        let cost = min_cost_path(&grid, Point::ZERO, Point::new(1, 1), 3).unwrap();
        assert_eq!(cost, 2);
    }

    #[test]
    fn cheap_detour_beats_direct_route() {
        let grid = costs(
            "19\n\
             11",
        );
        // East then south costs 9 + 1; south then east costs 1 + 1.
        let cost = min_cost_path(&grid, Point::ZERO, Point::new(1, 1), 3).unwrap();
        assert_eq!(cost, 2);
    }

    #[test]
    fn max_straight_forces_a_zigzag() {
        // A single row longer than the straight budget is unsolvable:
        // there is no second row to sidestep into.
        let grid = costs("11111");
        let err = min_cost_path(&grid, Point::ZERO, Point::new(4, 0), 3).unwrap_err();
        assert_eq!(err, TraverseError::NoPathFound);

        // With a second row the walker can sidestep and come back.
        let grid = costs("11111\n11111");
        let cost = min_cost_path(&grid, Point::ZERO, Point::new(4, 0), 3).unwrap();
        // Four eastward cells plus one sidestep down and one back up.
        assert_eq!(cost, 6);
    }

    #[test]
    fn run_budget_is_consecutive_not_total() {
        let grid = costs("111\n111");
        // Three straight moves are allowed when max_straight is 3.
        let cost = min_cost_path(&grid, Point::ZERO, Point::new(2, 0), 3).unwrap();
        assert_eq!(cost, 2);
    }

    #[test]
    fn clumsy_crucible_sample() {
        let grid = costs(
            "2413432311323\n\
             3215453535623\n\
             3255245654254\n\
             3446585845452\n\
             4546657867536\n\
             1438598798454\n\
             4457876987766\n\
             3637877979653\n\
             4654967986887\n\
             4564679986453\n\
             1224686865563\n\
             2546548887735\n\
             4322674655533",
        );
        let goal = Point::new(grid.width() - 1, grid.height() - 1);
        let cost = min_cost_path(&grid, Point::ZERO, goal, 3).unwrap();
        assert_eq!(cost, 102);
    }

    #[test]
    fn reversing_is_forbidden() {
        let grid = costs("11\n11");
        let steer = steering(&grid, 3);
        let mut buf = Vec::new();
        steer.successors(&Steer::new(Point::new(1, 0), Direction::East, 1), &mut buf);
        // East would leave the grid, west would reverse; only south remains.
        assert_eq!(buf, vec![Steer::new(Point::new(1, 1), Direction::South, 1)]);
    }

    #[test]
    fn goal_equals_start_costs_nothing() {
        let grid = costs("55\n55");
        let cost = min_cost_path(&grid, Point::ZERO, Point::ZERO, 3).unwrap();
        assert_eq!(cost, 0);
    }

    #[test]
    fn unreachable_goal_is_a_typed_failure() {
        let grid = costs("11");
        // max_straight 1 cannot get two cells east on a single row.
        let err = min_cost_path(&grid, Point::ZERO, Point::new(1, 0), 0).unwrap_err();
        assert_eq!(err, TraverseError::NoPathFound);
    }

    #[test]
    fn multi_seed_minimum_over_goal_arrivals() {
        let grid = costs("191\n131");
        let seeds = [
            Steer::new(Point::new(0, 0), Direction::East, 0),
            Steer::new(Point::new(0, 1), Direction::East, 0),
        ];
        let cost = shortest_path(
            &grid,
            &seeds,
            &steering(&grid, 3),
            |p| grid[p],
            |p| p.x == 2,
        )
        .unwrap();
        // Bottom seed reaches column 2 through cost 3 + 1; top seed pays
        // 9 + 1. The cheaper arrival must win.
        assert_eq!(cost, 4);
    }

    #[test]
    fn off_grid_seed_is_invalid() {
        let grid = costs("11\n11");
        let err = min_cost_path(&grid, Point::new(7, 7), Point::ZERO, 3).unwrap_err();
        assert!(matches!(err, TraverseError::InvalidTransition { .. }));
    }

    #[test]
    fn torus_moves_land_on_canonical_cells() {
        let grid = costs("111\n111\n111").with_topology(Topology::Torus);
        let steer = steering(&grid, 3);
        let mut buf = Vec::new();
        steer.successors(&Steer::new(Point::ZERO, Direction::East, 1), &mut buf);
        // Wrapped moves must dedup against in-bounds states, never drift
        // off to ever-growing coordinates.
        assert!(buf.iter().all(|s| grid.in_bounds(s.pos)));
        assert!(buf.contains(&Steer::new(Point::new(0, 2), Direction::North, 1)));
    }

    #[test]
    fn torus_shortcut_beats_the_long_way_round() {
        let grid = costs("191").with_topology(Topology::Torus);
        // Westward wrap reaches the goal in one move for cost 1; going
        // east pays the 9 on the way.
        let cost = min_cost_path(&grid, Point::ZERO, Point::new(2, 0), 3).unwrap();
        assert_eq!(cost, 1);
    }
}
