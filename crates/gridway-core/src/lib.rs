//! **gridway-core** — geometry primitives and the immutable grid model.
//!
//! This crate provides the foundational types used across the *gridway*
//! engine: integer points, cardinal directions, and a generic rectangular
//! [`Grid`] with bounded or toroidal addressing.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::GridError;
pub use geom::{Direction, Point};
pub use grid::{Grid, Topology};
