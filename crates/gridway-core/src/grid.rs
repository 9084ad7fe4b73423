//! The [`Grid`] type — an immutable rectangular table of cells.
//!
//! A `Grid` is built once from parsed input text and never mutated by a
//! traversal; only traversal state changes. Addressing is either bounded
//! (out-of-range access is an error) or toroidal (coordinates wrap).

use std::ops::Index;

use crate::error::GridError;
use crate::geom::Point;

/// Addressing mode of a [`Grid`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// Out-of-bounds positions are invalid.
    #[default]
    Bounded,
    /// Positions wrap modulo width/height on each axis.
    Torus,
}

/// An immutable 2D grid of cells with row-major storage.
///
/// Width and height are fixed at construction and always positive; every
/// row has the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    cells: Vec<T>,
    width: i32,
    height: i32,
    topology: Topology,
}

impl<T> Grid<T> {
    /// Build a grid from row-major cells. Fails with
    /// [`GridError::Malformed`] if the dimensions are not positive or do
    /// not match the cell count.
    pub fn from_vec(width: i32, height: i32, cells: Vec<T>) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::Malformed {
                line: 0,
                reason: format!("dimensions {width}x{height} must be positive"),
            });
        }
        let expected = (width as usize) * (height as usize);
        if cells.len() != expected {
            return Err(GridError::Malformed {
                line: 0,
                reason: format!("expected {expected} cells, found {}", cells.len()),
            });
        }
        Ok(Self {
            cells,
            width,
            height,
            topology: Topology::Bounded,
        })
    }

    /// Build a grid from lines of text.
    ///
    /// Lines are trimmed and blank lines skipped. `decode` is the
    /// caller-supplied alphabet: returning `None` for a character fails
    /// construction, as do ragged rows or empty input. Line numbers in
    /// errors are 1-based over the non-blank lines.
    pub fn from_lines<'a, I, F>(lines: I, decode: F) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = &'a str>,
        F: Fn(char) -> Option<T>,
    {
        let mut cells = Vec::new();
        let mut width: Option<usize> = None;
        let mut height = 0usize;

        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            height += 1;
            let mut row_len = 0usize;
            for c in line.chars() {
                match decode(c) {
                    Some(cell) => cells.push(cell),
                    None => {
                        return Err(GridError::Malformed {
                            line: height,
                            reason: format!("character {c:?} outside grid alphabet"),
                        });
                    }
                }
                row_len += 1;
            }
            match width {
                None => width = Some(row_len),
                Some(w) if w != row_len => {
                    return Err(GridError::Malformed {
                        line: height,
                        reason: format!("expected {w} columns, found {row_len}"),
                    });
                }
                Some(_) => {}
            }
        }

        let width = width.ok_or(GridError::Malformed {
            line: 0,
            reason: "empty input".to_string(),
        })?;
        Self::from_vec(width as i32, height as i32, cells)
    }

    /// Switch the addressing mode, consuming the grid.
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Width of the grid (always positive).
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the grid (always positive).
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size as a `Point` (width = x, height = y).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// The addressing mode.
    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Whether `p` lies inside `[0, width) x [0, height)`.
    ///
    /// This is the raw bounds test, independent of topology.
    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Map `p` to an in-bounds position, or `None` if there is none.
    ///
    /// Bounded grids return `p` unchanged when it is in bounds; toroidal
    /// grids wrap each axis with a Euclidean modulo, so this always
    /// succeeds on a torus.
    #[inline]
    pub fn normalize(&self, p: Point) -> Option<Point> {
        match self.topology {
            Topology::Bounded => self.in_bounds(p).then_some(p),
            Topology::Torus => Some(Point::new(
                p.x.rem_euclid(self.width),
                p.y.rem_euclid(self.height),
            )),
        }
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        let p = self.normalize(p)?;
        Some((p.y * self.width + p.x) as usize)
    }

    /// Read the cell at `p`.
    ///
    /// Fails with [`GridError::OutOfBounds`] on a bounded grid when `p` is
    /// outside the grid; always succeeds on a torus.
    pub fn get(&self, p: Point) -> Result<&T, GridError> {
        self.idx(p)
            .map(|i| &self.cells[i])
            .ok_or(GridError::OutOfBounds {
                pos: p,
                width: self.width,
                height: self.height,
            })
    }

    /// Read the cell at `p`, or `None` when out of bounds.
    pub fn at(&self, p: Point) -> Option<&T> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// Append the orthogonal neighbours of `p` to `buf`, in north, east,
    /// south, west order. The caller clears `buf` before calling.
    ///
    /// Bounded grids filter out-of-bounds neighbours; toroidal grids wrap
    /// them, so a torus always yields four.
    pub fn neighbors4(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors_4() {
            if let Some(n) = self.normalize(n) {
                buf.push(n);
            }
        }
    }

    /// The row-major cell slice.
    ///
    /// This is the canonical full-grid serialization: two grids of equal
    /// dimensions hold the same configuration iff their cell slices are
    /// equal, which is what the cycle detector keys on.
    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Row-major iterator over `(Point, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        self.cells.iter().enumerate().map(|(i, cell)| {
            let i = i as i32;
            (Point::new(i % self.width, i / self.width), cell)
        })
    }

    /// Derive a same-shape grid by mapping every cell.
    pub fn map<U>(&self, mut f: impl FnMut(Point, &T) -> U) -> Grid<U> {
        Grid {
            cells: self.iter().map(|(p, cell)| f(p, cell)).collect(),
            width: self.width,
            height: self.height,
            topology: self.topology,
        }
    }

    /// Render the grid as text, one row per line, via a cell-to-char
    /// closure.
    pub fn render(&self, mut f: impl FnMut(&T) -> char) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for (p, cell) in self.iter() {
            if p.x == 0 && p.y > 0 {
                out.push('\n');
            }
            out.push(f(cell));
        }
        out
    }
}

impl<T> Index<Point> for Grid<T> {
    type Output = T;

    /// Panicking access for positions known to be on the grid.
    fn index(&self, p: Point) -> &T {
        match self.at(p) {
            Some(cell) => cell,
            None => panic!("position {p} outside {}x{} grid", self.width, self.height),
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = Grid::from_lines("12\n34".lines(), |c| c.to_digit(10))
            .unwrap()
            .with_topology(Topology::Torus);
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
        assert_eq!(back.topology(), Topology::Torus);
    }
}
