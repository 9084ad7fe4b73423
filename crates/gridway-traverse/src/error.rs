//! Error taxonomy for the traversal strategies.

use gridway_core::{GridError, Point};

/// Errors surfaced by the traversal engine.
///
/// All failures are deterministic functions of the input and are reported
/// synchronously; no partial results are returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraverseError {
    /// The worklist drained without any goal arrival. A typed failure
    /// rather than a sentinel cost: some callers legitimately probe
    /// unreachable configurations.
    #[error("no path to goal")]
    NoPathFound,

    /// A seed or transition-produced successor does not lie on a bounded
    /// grid. Indicates a bug in the caller's transition function.
    #[error("transition produced off-grid state at {pos}")]
    InvalidTransition { pos: Point },

    #[error(transparent)]
    Grid(#[from] GridError),
}
