//! Traversal states and the transition contract.

use std::hash::Hash;

use gridway_core::{Direction, Point};

/// A traversal state — the full discriminator used for visited
/// deduplication.
///
/// Equality is structural over *all* fields, not just the position: the
/// beam and steering strategies rely on the same tile being re-enterable
/// with a different heading while still terminating.
pub trait State: Clone + Eq + Hash {
    /// The spatial component of the state.
    fn pos(&self) -> Point;
}

/// Plain flood fill needs nothing beyond the position.
impl State for Point {
    #[inline]
    fn pos(&self) -> Point {
        *self
    }
}

/// State of a travelling beam: position plus heading.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Beam {
    pub pos: Point,
    pub dir: Direction,
}

impl Beam {
    pub const fn new(pos: Point, dir: Direction) -> Self {
        Self { pos, dir }
    }

    /// The beam advanced one step along its heading.
    #[inline]
    pub fn step(self) -> Self {
        Self {
            pos: self.pos + self.dir.delta(),
            dir: self.dir,
        }
    }

    /// The beam redirected to a new heading, advanced one step along it.
    #[inline]
    pub fn redirect(self, dir: Direction) -> Self {
        Self {
            pos: self.pos + dir.delta(),
            dir,
        }
    }
}

impl State for Beam {
    #[inline]
    fn pos(&self) -> Point {
        self.pos
    }
}

/// State of a movement-constrained walker: position, heading, and the
/// number of consecutive moves already taken in that heading.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Steer {
    pub pos: Point,
    pub dir: Direction,
    pub run: u8,
}

impl Steer {
    pub const fn new(pos: Point, dir: Direction, run: u8) -> Self {
        Self { pos, dir, run }
    }
}

impl State for Steer {
    #[inline]
    fn pos(&self) -> Point {
        self.pos
    }
}

/// Caller-supplied transition rule: appends the successors of `s` to
/// `buf`. The engine clears `buf` before calling.
///
/// Emitting zero successors is not an error; the state simply ends there.
pub trait Transition<S: State> {
    fn successors(&self, s: &S, buf: &mut Vec<S>);
}

impl<S: State, F: Fn(&S, &mut Vec<S>)> Transition<S> for F {
    #[inline]
    fn successors(&self, s: &S, buf: &mut Vec<S>) {
        self(s, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn beam_dedup_is_per_position_and_heading() {
        let mut set = HashSet::new();
        let p = Point::new(3, 3);
        assert!(set.insert(Beam::new(p, Direction::East)));
        assert!(set.insert(Beam::new(p, Direction::West)));
        assert!(!set.insert(Beam::new(p, Direction::East)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn beam_step_and_redirect() {
        let b = Beam::new(Point::ZERO, Direction::East);
        assert_eq!(b.step(), Beam::new(Point::new(1, 0), Direction::East));
        assert_eq!(
            b.redirect(Direction::South),
            Beam::new(Point::new(0, 1), Direction::South)
        );
    }

    #[test]
    fn steer_equality_includes_run_count() {
        let p = Point::new(1, 1);
        let a = Steer::new(p, Direction::East, 1);
        let b = Steer::new(p, Direction::East, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn closures_are_transitions() {
        let t = |s: &Point, buf: &mut Vec<Point>| buf.extend(s.neighbors_4());
        let mut buf = Vec::new();
        t.successors(&Point::ZERO, &mut buf);
        assert_eq!(buf.len(), 4);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn beam_round_trip() {
        let b = Beam::new(Point::new(2, 5), Direction::North);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(b, serde_json::from_str::<Beam>(&json).unwrap());
    }

    #[test]
    fn steer_round_trip() {
        let s = Steer::new(Point::new(4, 1), Direction::West, 3);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(s, serde_json::from_str::<Steer>(&json).unwrap());
    }
}
