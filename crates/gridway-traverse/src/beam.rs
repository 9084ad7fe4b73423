//! Memoized branching simulation — beams that split and bounce.
//!
//! Deduplication is per full state (position *and* heading), while the
//! answer is counted over distinct positions, so the two are tracked
//! separately.

use std::collections::HashSet;

use gridway_core::{Direction, Grid, Point, Topology};

use crate::error::TraverseError;
use crate::ledger::Ledger;
use crate::state::{Beam, State, Transition};

/// Positions and states touched by a [`simulate`] run.
#[derive(Debug, Clone, Default)]
pub struct Coverage {
    /// Distinct positions crossed by any state.
    pub positions: HashSet<Point>,
    /// Distinct full states visited.
    pub states: usize,
}

impl Coverage {
    /// Number of distinct positions crossed.
    pub fn energized(&self) -> usize {
        self.positions.len()
    }
}

/// Run a branching worklist simulation from `seeds` under `transition`.
///
/// Successors whose position falls off a bounded grid are dropped, not an
/// error: a beam that steps outside the grid dies rather than wrapping.
/// Seeds themselves must lie on the grid.
pub fn simulate<T, S, X>(
    grid: &Grid<T>,
    seeds: &[S],
    transition: &X,
) -> Result<Coverage, TraverseError>
where
    S: State,
    X: Transition<S>,
{
    let bounded = grid.topology() == Topology::Bounded;
    let mut ledger = Ledger::new();
    let mut positions = HashSet::new();
    let mut work = Vec::new();

    for seed in seeds {
        if bounded && !grid.in_bounds(seed.pos()) {
            return Err(TraverseError::InvalidTransition { pos: seed.pos() });
        }
        if ledger.try_visit(seed.clone()) {
            work.push(seed.clone());
        }
    }

    let mut buf = Vec::new();
    while let Some(s) = work.pop() {
        positions.insert(s.pos());
        buf.clear();
        transition.successors(&s, &mut buf);
        for succ in buf.drain(..) {
            if bounded && !grid.in_bounds(succ.pos()) {
                continue; // left the grid
            }
            if ledger.try_visit(succ.clone()) {
                work.push(succ);
            }
        }
    }

    log::debug!(
        "simulation covered {} positions across {} states",
        positions.len(),
        ledger.len()
    );
    Ok(Coverage {
        positions,
        states: ledger.len(),
    })
}

/// The best coverage over independent single-seed runs.
///
/// Each run owns a fresh ledger and worklist, so runs are mutually
/// independent; with the `parallel` feature they execute on the rayon
/// pool and the results reduce by maximum energized count.
pub fn best_coverage<T, S, X>(
    grid: &Grid<T>,
    seeds: &[S],
    transition: &X,
) -> Result<Coverage, TraverseError>
where
    T: Sync,
    S: State + Send + Sync,
    X: Transition<S> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        let runs: Result<Vec<Coverage>, TraverseError> = seeds
            .par_iter()
            .map(|seed| simulate(grid, std::slice::from_ref(seed), transition))
            .collect();
        Ok(runs?
            .into_iter()
            .max_by_key(Coverage::energized)
            .unwrap_or_default())
    }
    #[cfg(not(feature = "parallel"))]
    {
        let mut best = Coverage::default();
        for seed in seeds {
            let run = simulate(grid, std::slice::from_ref(seed), transition)?;
            if run.energized() > best.energized() {
                best = run;
            }
        }
        Ok(best)
    }
}

// ---------------------------------------------------------------------------
// Mirror optics
// ---------------------------------------------------------------------------

/// A tile in a mirror-and-splitter field.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    /// `.` — passes beams straight through.
    #[default]
    Empty,
    /// `/` — reflects, e.g. an eastbound beam to the north.
    MirrorFwd,
    /// `\` — reflects, e.g. an eastbound beam to the south.
    MirrorBack,
    /// `|` — passes vertical beams, splits horizontal ones north/south.
    SplitV,
    /// `-` — passes horizontal beams, splits vertical ones east/west.
    SplitH,
}

impl Tile {
    /// Decode a map character, for use with [`Grid::from_lines`].
    pub fn decode(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Empty),
            '/' => Some(Self::MirrorFwd),
            '\\' => Some(Self::MirrorBack),
            '|' => Some(Self::SplitV),
            '-' => Some(Self::SplitH),
            _ => None,
        }
    }

    /// Outgoing headings for a beam entering this tile with heading `dir`.
    ///
    /// The second heading is present only when a splitter forks the beam.
    pub fn outgoing(self, dir: Direction) -> (Direction, Option<Direction>) {
        use Direction::*;
        match self {
            Self::Empty => (dir, None),
            // '/' swaps the axis: east <-> north, west <-> south.
            Self::MirrorFwd => match dir {
                North => (East, None),
                East => (North, None),
                South => (West, None),
                West => (South, None),
            },
            // '\' swaps the other way: east <-> south, west <-> north.
            Self::MirrorBack => match dir {
                North => (West, None),
                East => (South, None),
                South => (East, None),
                West => (North, None),
            },
            Self::SplitV if dir.is_vertical() => (dir, None),
            Self::SplitV => (North, Some(South)),
            Self::SplitH if !dir.is_vertical() => (dir, None),
            Self::SplitH => (East, Some(West)),
        }
    }
}

/// [`Transition`] over a [`Tile`] grid implementing the mirror optics.
pub struct MirrorField<'g> {
    grid: &'g Grid<Tile>,
}

/// Build the mirror-optics transition for a tile grid.
pub fn mirror_transition(grid: &Grid<Tile>) -> MirrorField<'_> {
    MirrorField { grid }
}

impl Transition<Beam> for MirrorField<'_> {
    fn successors(&self, b: &Beam, buf: &mut Vec<Beam>) {
        let Some(tile) = self.grid.at(b.pos) else {
            return;
        };
        let (first, second) = tile.outgoing(b.dir);
        for dir in std::iter::once(first).chain(second) {
            // Normalized so a torus wraps to the canonical cell; off a
            // bounded grid the beam dies.
            if let Some(pos) = self.grid.normalize(b.pos + dir.delta()) {
                buf.push(Beam::new(pos, dir));
            }
        }
    }
}

/// Every border tile of `grid`, aimed inward: the seed set for a
/// maximum-coverage sweep. Corner tiles appear twice, once per axis.
pub fn border_seeds<T>(grid: &Grid<T>) -> Vec<Beam> {
    let (w, h) = (grid.width(), grid.height());
    let mut seeds = Vec::with_capacity(2 * (w + h) as usize);
    for x in 0..w {
        seeds.push(Beam::new(Point::new(x, 0), Direction::South));
        seeds.push(Beam::new(Point::new(x, h - 1), Direction::North));
    }
    for y in 0..h {
        seeds.push(Beam::new(Point::new(0, y), Direction::East));
        seeds.push(Beam::new(Point::new(w - 1, y), Direction::West));
    }
    seeds
}
