//! **gridway-traverse** — worklist traversal strategies over 2D grids.
//!
//! This crate provides three interchangeable traversal strategies sharing
//! one visited-state substrate, plus a cycle detector for long repeated
//! simulations:
//!
//! - **Flood fill** — frontier-by-frontier BFS with an optional round
//!   budget ([`flood_fill`])
//! - **Branching simulation** — beam-style worklist expansion deduplicated
//!   per (position, heading) ([`simulate`], [`best_coverage`])
//! - **Constrained shortest path** — cost-ordered search over states
//!   augmented with heading and run constraints ([`shortest_path`],
//!   [`min_cost_path`])
//! - **Cycle acceleration** — configuration-repeat detection and modular
//!   fast-forward for step-heavy simulations ([`CycleDetector`],
//!   [`run_cycled`])
//!
//! Puzzle-specific behaviour is injected purely through the [`Transition`]
//! contract and the cost/goal closures; the grid itself is immutable for
//! the whole traversal and only traversal state changes.
//!
//! # State requirements
//!
//! | Strategy | State | Ledger |
//! |---|---|---|
//! | [`flood_fill`] | any [`State`] (often plain `Point`) | [`Ledger`] |
//! | [`simulate`] | [`State`] with direction identity (e.g. [`Beam`]) | [`Ledger`] |
//! | [`shortest_path`] | [`State`] with movement constraints (e.g. [`Steer`]) | [`CostLedger`] |

mod beam;
mod cycle;
mod error;
mod flood;
mod ledger;
mod search;
mod state;

pub use beam::{Coverage, MirrorField, Tile, best_coverage, border_seeds, mirror_transition, simulate};
pub use cycle::{Cycle, CycleDetector, Rock, north_load, run_cycled, spin, tilt};
pub use error::TraverseError;
pub use flood::{FloodResult, flood_fill};
pub use ledger::{CostLedger, Ledger};
pub use search::{Steering, min_cost_path, shortest_path, steering};
pub use state::{Beam, State, Steer, Transition};
