//! Cycle detection and fast-forwarded simulation.
//!
//! When the same full-grid configuration recurs under a deterministic step
//! function, the simulation is periodic from that point on and the bulk of
//! the remaining steps can be skipped with modular arithmetic.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

use gridway_core::{Direction, Grid, Point};

/// A detected repetition: the step the configuration was first seen at,
/// and the distance to its re-occurrence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cycle {
    pub start: u64,
    pub period: u64,
}

/// Tracks full configuration snapshots across simulation steps.
///
/// The key must be the complete canonical serialization of the
/// configuration (for grids, [`Grid::cells`] cloned out), never a lossy
/// hash of it: a false-positive cycle silently produces a wrong answer
/// with no detectable error.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector<K> {
    seen: HashMap<K, u64>,
}

impl<K: Eq + Hash> CycleDetector<K> {
    pub fn new() -> Self {
        Self {
            seen: HashMap::new(),
        }
    }

    /// Record the configuration observed at `step`.
    ///
    /// Returns the cycle on the first re-occurrence of any previously
    /// observed configuration, `None` before that. The first-seen step of
    /// a configuration is never updated, so later occurrences measure
    /// from the original sighting: a third occurrence reports a multiple
    /// of the true period.
    pub fn observe(&mut self, step: u64, key: K) -> Option<Cycle> {
        match self.seen.entry(key) {
            Entry::Occupied(first) => Some(Cycle {
                start: *first.get(),
                period: step - *first.get(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(step);
                None
            }
        }
    }

    /// Number of distinct configurations observed.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Drive `step` for `total_steps` iterations, skipping ahead once a cycle
/// is detected.
///
/// After detection only `(total_steps - step) % period` further iterations
/// run; the result is identical to simulating every step.
pub fn run_cycled<T, F>(grid: Grid<T>, total_steps: u64, mut step: F) -> Grid<T>
where
    T: Clone + Eq + Hash,
    F: FnMut(&Grid<T>) -> Grid<T>,
{
    let mut detector = CycleDetector::new();
    detector.observe(0, grid.cells().to_vec());

    let mut current = grid;
    let mut done = 0u64;
    while done < total_steps {
        current = step(&current);
        done += 1;
        if let Some(cycle) = detector.observe(done, current.cells().to_vec()) {
            let remaining = (total_steps - done) % cycle.period;
            log::debug!(
                "cycle of period {} from step {} detected at step {done}; \
                 fast-forwarding, {remaining} steps left",
                cycle.period,
                cycle.start
            );
            for _ in 0..remaining {
                current = step(&current);
            }
            return current;
        }
    }
    current
}

// ---------------------------------------------------------------------------
// Rolling-rock platform
// ---------------------------------------------------------------------------

/// A cell on a tilting rock platform.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rock {
    /// `.` — open ground.
    #[default]
    Empty,
    /// `O` — a round rock that rolls when the platform tilts.
    Round,
    /// `#` — a cube rock that never moves.
    Cube,
}

impl Rock {
    /// Decode a map character, for use with [`Grid::from_lines`].
    pub fn decode(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Empty),
            'O' => Some(Self::Round),
            '#' => Some(Self::Cube),
            _ => None,
        }
    }
}

/// Tilt the platform so every round rock rolls toward `dir` until blocked
/// by the edge, a cube, or an already settled rock.
pub fn tilt(grid: &Grid<Rock>, dir: Direction) -> Grid<Rock> {
    let w = grid.width();
    let mut cells = grid.cells().to_vec();
    let idx = |p: Point| (p.y * w + p.x) as usize;
    let delta = dir.delta();

    // Cells nearer the tilt edge must settle first: natural row-major
    // order works for north and west, the reverse for south and east.
    let mut points: Vec<Point> = grid.iter().map(|(p, _)| p).collect();
    if matches!(dir, Direction::South | Direction::East) {
        points.reverse();
    }

    for p in points {
        if cells[idx(p)] != Rock::Round {
            continue;
        }
        let mut rest = p;
        loop {
            let next = rest + delta;
            if !grid.in_bounds(next) || cells[idx(next)] != Rock::Empty {
                break;
            }
            rest = next;
        }
        if rest != p {
            cells[idx(p)] = Rock::Empty;
            cells[idx(rest)] = Rock::Round;
        }
    }

    grid.map(|p, _| cells[idx(p)])
}

/// One full spin: tilt north, west, south, east.
pub fn spin(grid: &Grid<Rock>) -> Grid<Rock> {
    let g = tilt(grid, Direction::North);
    let g = tilt(&g, Direction::West);
    let g = tilt(&g, Direction::South);
    tilt(&g, Direction::East)
}

/// Load on the north support beams: each round rock contributes the
/// number of rows from it to the south edge, inclusive.
pub fn north_load(grid: &Grid<Rock>) -> u32 {
    grid.iter()
        .filter(|&(_, cell)| *cell == Rock::Round)
        .map(|(p, _)| (grid.height() - p.y) as u32)
        .sum()
}
