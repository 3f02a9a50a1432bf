//! Ghost Life - Parallel Game of Life on a ghost-bordered grid.
//!
//! This crate provides a multi-threaded implementation of Conway's Game of
//! Life. The grid carries a one-cell ring of permanently dead cells so that
//! neighbor counts never need bounds checks, and each generation is computed
//! in row-parallel passes on a dedicated rayon pool.
//!
//! # Architecture
//!
//! The crate is split into three modules:
//!
//! - `schema`: Configuration types and initial patterns
//! - `compute`: Grid storage, the transition rule, and the propagator
//! - `render`: Plain-text rendering of a grid
//!
//! # Example
//!
//! ```rust,no_run
//! use ghost_life::{
//!     compute::{CpuPropagator, SimulationState},
//!     schema::{Seed, SimulationConfig},
//! };
//!
//! let config = SimulationConfig {
//!     size: 32,
//!     threads: Some(4),
//!     ..Default::default()
//! };
//!
//! let mut state = SimulationState::from_initializer(config.size, &Seed::glider(1, 1))?;
//! let mut propagator = CpuPropagator::new(config)?;
//! propagator.run(&mut state, 100)?;
//!
//! println!("Population after 100 steps: {}", state.population());
//! # Ok::<(), ghost_life::LifeError>(())
//! ```

pub mod compute;
pub mod render;
pub mod schema;

// Re-export commonly used types
pub use compute::{CpuPropagator, Grid, GridError, SimulationState, SimulationStats};
pub use schema::{ConfigError, Initializer, Pattern, Seed, SimulationConfig, UpdateStrategy};

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum LifeError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
