//! Compute module - Grid storage and the update engine for Game of Life.

mod grid;
mod propagator;
mod rule;

pub use grid::*;
pub use propagator::*;
pub use rule::*;
