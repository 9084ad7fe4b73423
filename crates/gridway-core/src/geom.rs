//! Geometry primitives: [`Point`] and [`Direction`].

use std::fmt;
use std::ops::{Add, Mul, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer point. X grows right, Y grows down (screen coordinates).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a point shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan (L1) distance to another point.
    #[inline]
    pub const fn manhattan(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The four cardinal neighbours, in north, east, south, west order.
    ///
    /// The order is fixed because direction-sensitive traversals (beam
    /// reflection, steering) depend on direction identity, not just the
    /// resulting position.
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        [
            Self::new(self.x, self.y - 1),
            Self::new(self.x + 1, self.y),
            Self::new(self.x, self.y + 1),
            Self::new(self.x - 1, self.y),
        ]
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Point {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// A cardinal direction on a grid with Y growing down.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four directions, in the same north, east, south, west order as
    /// [`Point::neighbors_4`].
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Unit step for this direction.
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Self::North => Point::new(0, -1),
            Self::East => Point::new(1, 0),
            Self::South => Point::new(0, 1),
            Self::West => Point::new(-1, 0),
        }
    }

    /// The reverse direction.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Quarter turn counter-clockwise.
    #[inline]
    pub const fn left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// Quarter turn clockwise.
    #[inline]
    pub const fn right(self) -> Self {
        self.left().opposite()
    }

    /// Whether this direction moves along the Y axis.
    #[inline]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::North | Self::South)
    }
}

impl From<Direction> for Point {
    fn from(d: Direction) -> Self {
        d.delta()
    }
}

impl TryFrom<Point> for Direction {
    type Error = ();

    /// Convert a unit delta back into a direction.
    fn try_from(p: Point) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|d| d.delta() == p)
            .ok_or(())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1, 2);
        let b = Point::new(3, 4);
        assert_eq!(a + b, Point::new(4, 6));
        assert_eq!(b - a, Point::new(2, 2));
        assert_eq!(a * 3, Point::new(3, 6));
        assert_eq!(a.shift(-1, 1), Point::new(0, 3));
    }

    #[test]
    fn point_manhattan() {
        assert_eq!(Point::ZERO.manhattan(Point::new(2, -3)), 5);
        assert_eq!(Point::new(1, 1).manhattan(Point::new(1, 1)), 0);
    }

    #[test]
    fn neighbors_4_order_is_north_east_south_west() {
        let p = Point::new(2, 2);
        let ns = p.neighbors_4();
        assert_eq!(ns[0], Point::new(2, 1));
        assert_eq!(ns[1], Point::new(3, 2));
        assert_eq!(ns[2], Point::new(2, 3));
        assert_eq!(ns[3], Point::new(1, 2));
        for (d, n) in Direction::ALL.into_iter().zip(ns) {
            assert_eq!(p + d.delta(), n);
        }
    }

    #[test]
    fn direction_opposite_and_turns() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.left().right(), d);
            assert_eq!(d.left().left(), d.opposite());
            assert_ne!(d.is_vertical(), d.left().is_vertical());
        }
    }

    #[test]
    fn direction_from_delta() {
        for d in Direction::ALL {
            assert_eq!(Direction::try_from(d.delta()), Ok(d));
        }
        assert!(Direction::try_from(Point::new(1, 1)).is_err());
        assert!(Direction::try_from(Point::ZERO).is_err());
    }
}
