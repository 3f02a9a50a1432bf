//! Configuration types for Game of Life runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

fn default_steps() -> u64 {
    100
}

fn default_rows_per_task() -> usize {
    1
}

/// How the propagator advances a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStrategy {
    /// Count all neighbors into the scratch buffer, then apply the rule in
    /// place. A barrier separates the two passes.
    TwoPass,
    /// Read the current generation, write the next into a second buffer,
    /// swap. One fused pass per step.
    #[default]
    DoubleBuffer,
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Interior side length N (grid is (N+2) x (N+2) with the border).
    pub size: usize,
    /// Number of generations to run.
    #[serde(default = "default_steps")]
    pub steps: u64,
    /// Initial alive chance in tenths (1-10).
    pub probability: u8,
    /// Worker pool size. `None` uses the available hardware parallelism.
    #[serde(default)]
    pub threads: Option<usize>,
    /// Update strategy.
    #[serde(default)]
    pub strategy: UpdateStrategy,
    /// Minimum number of contiguous rows handed to one worker task.
    #[serde(default = "default_rows_per_task")]
    pub rows_per_task: usize,
    /// RNG seed for the random initial pattern. `None` draws from entropy.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            size: 64,
            steps: default_steps(),
            probability: 3,
            threads: None,
            strategy: UpdateStrategy::default(),
            rows_per_task: default_rows_per_task(),
            rng_seed: None,
        }
    }
}

impl SimulationConfig {
    /// Build a configuration from the positional form
    /// `<N> <steps> <probability> <threads>`.
    pub fn from_positional(args: &[&str]) -> Result<Self, ConfigError> {
        let [size, steps, probability, threads] = args else {
            return Err(ConfigError::ArgumentCount(args.len()));
        };

        let config = Self {
            size: parse_arg("N", size)?,
            steps: parse_arg("steps", steps)?,
            probability: parse_arg("probability", probability)?,
            threads: Some(parse_arg("threads", threads)?),
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::InvalidSize);
        }
        if !(1..=10).contains(&self.probability) {
            return Err(ConfigError::InvalidProbability(self.probability));
        }
        if self.threads == Some(0) {
            return Err(ConfigError::InvalidThreads);
        }
        if self.rows_per_task == 0 {
            return Err(ConfigError::InvalidRowsPerTask);
        }
        Ok(())
    }
}

fn parse_arg<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidArgument {
        name,
        value: value.to_string(),
    })
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid size N must be positive")]
    InvalidSize,
    #[error("Probability must be an integer in [1, 10], got {0}")]
    InvalidProbability(u8),
    #[error("Thread count must be positive")]
    InvalidThreads,
    #[error("Rows per task must be positive")]
    InvalidRowsPerTask,
    #[error("Expected 4 positional arguments or a config path, got {0} arguments")]
    ArgumentCount(usize),
    #[error("Invalid value for {name}: {value:?}")]
    InvalidArgument { name: &'static str, value: String },
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
