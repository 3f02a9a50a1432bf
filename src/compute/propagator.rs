//! CPU Propagator - Main simulation driver for Game of Life.
//!
//! Orchestrates the per-step passes over the grid on a dedicated rayon pool.

use std::ops::ControlFlow;

use rayon::prelude::*;

use crate::LifeError;
use crate::schema::{Initializer, SimulationConfig, UpdateStrategy};

use super::Grid;
use super::grid::{padded_cells, try_zeroed};
use super::rule::{advance_row_into, apply_row, count_row_into};

/// Simulation state container.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Cell grid, mutated in place every step.
    pub grid: Grid,
    /// Completed generations.
    pub generation: u64,
}

impl SimulationState {
    /// Create a new state of interior size `n` populated by `init`.
    pub fn from_initializer(n: usize, init: &impl Initializer) -> Result<Self, LifeError> {
        let mut grid = Grid::new(n)?;
        init.initialize(&mut grid)?;
        Ok(Self::from_grid(grid))
    }

    /// Wrap an existing grid at generation 0.
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            generation: 0,
        }
    }

    /// Live cell count.
    pub fn population(&self) -> usize {
        self.grid.population()
    }
}

/// CPU-based Game of Life propagator.
pub struct CpuPropagator {
    config: SimulationConfig,
    pool: rayon::ThreadPool,
    /// Pre-allocated buffer for the next generation (double-buffer strategy).
    next_status: Vec<u8>,
}

impl CpuPropagator {
    /// Create new propagator from configuration.
    pub fn new(config: SimulationConfig) -> Result<Self, LifeError> {
        config.validate()?;

        let threads = config
            .threads
            .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, |n| n.get()));
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("life-worker-{}", i))
            .build()?;

        // Two-pass keeps its scratch inside the grid
        let next_status = match config.strategy {
            UpdateStrategy::DoubleBuffer => try_zeroed(padded_cells(config.size)?)?,
            UpdateStrategy::TwoPass => Vec::new(),
        };

        log::info!(
            "Propagator ready: {}x{} interior, {} threads, {:?}, {} rows/task",
            config.size,
            config.size,
            pool.current_num_threads(),
            config.strategy,
            config.rows_per_task
        );

        Ok(Self {
            config,
            pool,
            next_status,
        })
    }

    /// Perform one simulation step.
    ///
    /// Fails only if a grid of a different size than configured needs a new
    /// scratch buffer and that allocation fails; the grid is then unchanged.
    pub fn step(&mut self, state: &mut SimulationState) -> Result<(), LifeError> {
        match self.config.strategy {
            UpdateStrategy::TwoPass => self.step_two_pass(&mut state.grid),
            UpdateStrategy::DoubleBuffer => self.step_double_buffer(&mut state.grid)?,
        }
        state.generation += 1;
        log::debug!(
            "Generation {}: population {}",
            state.generation,
            state.grid.population()
        );
        Ok(())
    }

    /// Count every neighbor sum, then apply the rule in place.
    ///
    /// The first `for_each` returns only once every row is counted, so no
    /// apply ever observes a partially updated neighborhood.
    fn step_two_pass(&self, grid: &mut Grid) {
        let n = grid.size();
        let stride = grid.stride();
        let min_rows = self.config.rows_per_task;

        self.pool.install(|| {
            // 1. Count
            let (status, counts) = grid.count_buffers();
            counts[stride..(n + 1) * stride]
                .par_chunks_mut(stride)
                .with_min_len(min_rows)
                .enumerate()
                .for_each(|(i, counts_row)| {
                    count_row_into(status, i + 1, counts_row, n, stride);
                });

            // 2. Apply
            let (status, counts) = grid.apply_buffers();
            status[stride..(n + 1) * stride]
                .par_chunks_mut(stride)
                .zip(counts[stride..(n + 1) * stride].par_chunks(stride))
                .with_min_len(min_rows)
                .for_each(|(status_row, counts_row)| {
                    apply_row(status_row, counts_row, n);
                });
        });
    }

    /// Fused pass into the spare buffer, then swap it in.
    fn step_double_buffer(&mut self, grid: &mut Grid) -> Result<(), LifeError> {
        let n = grid.size();
        let stride = grid.stride();
        let min_rows = self.config.rows_per_task;

        // Grid may differ from the configured size
        let cells = padded_cells(n)?;
        if self.next_status.len() != cells {
            log::warn!(
                "Grid size {} differs from configured {}, reallocating scratch",
                n,
                self.config.size
            );
            self.next_status = try_zeroed(cells)?;
        }

        let current = grid.status();
        let next = &mut self.next_status;
        self.pool.install(|| {
            next[stride..(n + 1) * stride]
                .par_chunks_mut(stride)
                .with_min_len(min_rows)
                .enumerate()
                .for_each(|(i, next_row)| {
                    advance_row_into(current, i + 1, next_row, n, stride);
                });
        });

        grid.swap_status(&mut self.next_status);
        Ok(())
    }

    /// Run simulation for specified number of steps.
    pub fn run(&mut self, state: &mut SimulationState, steps: u64) -> Result<(), LifeError> {
        self.run_with(state, steps, |_| ControlFlow::Continue(()))?;
        Ok(())
    }

    /// Run up to `steps` steps, calling `observer` after each committed step.
    ///
    /// A `Break` from the observer stops the run at that step boundary.
    /// Returns the number of steps executed.
    pub fn run_with<F>(
        &mut self,
        state: &mut SimulationState,
        steps: u64,
        mut observer: F,
    ) -> Result<u64, LifeError>
    where
        F: FnMut(&SimulationState) -> ControlFlow<()>,
    {
        let mut done = 0;
        while done < steps {
            self.step(state)?;
            done += 1;
            if observer(state).is_break() {
                log::info!("Run stopped after {} of {} steps", done, steps);
                break;
            }
        }
        log::info!(
            "Ran {} steps, generation {}, population {}",
            done,
            state.generation,
            state.population()
        );
        Ok(done)
    }

    /// Worker pool size.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Active update strategy.
    pub fn strategy(&self) -> UpdateStrategy {
        self.config.strategy
    }

    /// Get configuration reference.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

/// Simulation statistics for monitoring.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SimulationStats {
    pub generation: u64,
    pub population: usize,
    /// Fraction of interior cells alive.
    pub density: f32,
}

impl SimulationStats {
    /// Compute statistics from state.
    pub fn from_state(state: &SimulationState) -> Self {
        let n = state.grid.size();
        let population = state.population();
        Self {
            generation: state.generation,
            population,
            density: population as f32 / (n * n) as f32,
        }
    }
}
