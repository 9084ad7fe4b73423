//! Error taxonomy for grid construction and addressing.

use crate::geom::Point;

/// Errors produced by [`Grid`](crate::Grid) construction and access.
///
/// Both variants are deterministic functions of the input; nothing here is
/// retried or recovered from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The input text does not describe a rectangular grid over the
    /// caller-supplied alphabet.
    #[error("malformed grid at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// A position outside `[0, width) x [0, height)` was addressed on a
    /// bounded grid. On non-construction paths this indicates a bug in the
    /// caller's transition function.
    #[error("position {pos} outside {width}x{height} grid")]
    OutOfBounds {
        pos: Point,
        width: i32,
        height: i32,
    },
}
