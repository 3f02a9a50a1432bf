//! Seed types for initializing Game of Life grids.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::LifeError;
use crate::compute::{Grid, GridError};

use super::ConfigError;

/// Anything that can populate a freshly created grid.
pub trait Initializer {
    /// Write the initial pattern into `grid`.
    fn initialize(&self, grid: &mut Grid) -> Result<(), LifeError>;
}

/// Closures map interior (row, col) to alive/dead.
impl<F> Initializer for F
where
    F: Fn(usize, usize) -> bool,
{
    fn initialize(&self, grid: &mut Grid) -> Result<(), LifeError> {
        for (row, col) in grid.interior_cells() {
            grid.set_status(row, col, self(row, col))?;
        }
        Ok(())
    }
}

/// Complete seed specification for grid initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern to use for seeding.
    pub pattern: Pattern,
}

impl Default for Seed {
    fn default() -> Self {
        Self::random(3, None)
    }
}

/// Predefined patterns for initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// All cells dead.
    Empty,
    /// Each interior cell independently alive with chance `probability / 10`.
    Random {
        /// Alive chance in tenths (1-10).
        probability: u8,
        /// RNG seed. `None` draws from entropy.
        #[serde(default)]
        seed: Option<u64>,
    },
    /// South-east travelling glider.
    Glider {
        /// Top row of the glider's 3x3 bounding box.
        row: usize,
        /// Left column of the glider's 3x3 bounding box.
        col: usize,
    },
    /// Explicit list of live interior cells as (row, col).
    Cells { cells: Vec<(usize, usize)> },
}

/// Glider cells relative to the top-left of its bounding box.
///
/// ```text
/// . X .
/// . . X
/// X X X
/// ```
pub const GLIDER: [(usize, usize); 5] = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];

impl Seed {
    /// Random pattern with the given alive chance in tenths.
    pub fn random(probability: u8, seed: Option<u64>) -> Self {
        Self {
            pattern: Pattern::Random { probability, seed },
        }
    }

    /// Glider with bounding box at (row, col).
    pub fn glider(row: usize, col: usize) -> Self {
        Self {
            pattern: Pattern::Glider { row, col },
        }
    }

    /// Validate pattern parameters that do not depend on the grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Pattern::Random { probability, .. } = self.pattern {
            if !(1..=10).contains(&probability) {
                return Err(ConfigError::InvalidProbability(probability));
            }
        }
        Ok(())
    }
}

impl Initializer for Seed {
    /// Either every pattern cell is written or none is: positions are all
    /// checked against the grid before the first write.
    fn initialize(&self, grid: &mut Grid) -> Result<(), LifeError> {
        self.validate()?;

        match &self.pattern {
            Pattern::Empty => {}
            Pattern::Random { probability, seed } => {
                let mut rng = match seed {
                    Some(s) => StdRng::seed_from_u64(*s),
                    None => StdRng::from_entropy(),
                };
                apply_random(grid, *probability, &mut rng)?;
            }
            Pattern::Glider { row, col } => {
                let cells = GLIDER.map(|(dr, dc)| (row.saturating_add(dr), col.saturating_add(dc)));
                set_all_alive(grid, &cells)?;
            }
            Pattern::Cells { cells } => set_all_alive(grid, cells)?,
        }
        Ok(())
    }
}

/// Mark every listed interior cell alive, or none if any is on the border or
/// out of range.
fn set_all_alive(grid: &mut Grid, cells: &[(usize, usize)]) -> Result<(), GridError> {
    for &(row, col) in cells {
        grid.check_interior(row, col)?;
    }
    for &(row, col) in cells {
        grid.set_status(row, col, true)?;
    }
    Ok(())
}

/// A cell is born when a uniform draw from 0..10 lands at or above `10 - p`.
/// `p` is already known to be in 1..=10.
fn apply_random(grid: &mut Grid, probability: u8, rng: &mut StdRng) -> Result<(), GridError> {
    let threshold = 10 - probability;
    for (row, col) in grid.interior_cells() {
        let chance: u8 = rng.gen_range(0..10);
        if chance >= threshold {
            grid.set_status(row, col, true)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_is_reproducible() {
        let seed = Seed::random(4, Some(1234));
        let mut a = Grid::new(20).unwrap();
        let mut b = Grid::new(20).unwrap();
        seed.initialize(&mut a).unwrap();
        seed.initialize(&mut b).unwrap();
        assert_eq!(a, b);
        assert!(a.population() > 0);
        assert!(a.border_is_dead());
    }

    #[test]
    fn test_full_probability_fills_interior() {
        let mut grid = Grid::new(7).unwrap();
        Seed::random(10, Some(1)).initialize(&mut grid).unwrap();
        assert_eq!(grid.population(), 49);
        assert!(grid.border_is_dead());
    }

    #[test]
    fn test_random_density_is_roughly_p_over_ten() {
        let mut grid = Grid::new(100).unwrap();
        Seed::random(3, Some(99)).initialize(&mut grid).unwrap();
        let density = grid.population() as f32 / 10_000.0;
        assert!(
            (density - 0.3).abs() < 0.03,
            "density {} too far from 0.3",
            density
        );
    }

    #[test]
    fn test_glider_cells() {
        let mut grid = Grid::new(10).unwrap();
        Seed::glider(1, 1).initialize(&mut grid).unwrap();
        assert_eq!(grid.population(), 5);
        for (dr, dc) in GLIDER {
            assert!(grid.get_status(1 + dr, 1 + dc).unwrap());
        }
    }

    #[test]
    fn test_glider_must_fit_interior() {
        let mut grid = Grid::new(4).unwrap();
        assert!(matches!(
            Seed::glider(3, 1).initialize(&mut grid),
            Err(LifeError::Grid(GridError::BorderCell { row: 5, col: 1 }))
        ));
        // Nothing written when any glider cell is rejected
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_rejected_cells_leave_grid_untouched() {
        let mut grid = Grid::new(3).unwrap();
        let seed = Seed {
            pattern: Pattern::Cells {
                cells: vec![(1, 1), (2, 2), (9, 9)],
            },
        };
        assert!(matches!(
            seed.initialize(&mut grid),
            Err(LifeError::Grid(GridError::OutOfBounds { row: 9, col: 9, .. }))
        ));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_random_probability_out_of_range() {
        for probability in [0u8, 11, 200] {
            let seed = Seed::random(probability, Some(1));
            assert!(matches!(
                seed.validate(),
                Err(ConfigError::InvalidProbability(p)) if p == probability
            ));

            let mut grid = Grid::new(10).unwrap();
            assert!(matches!(
                seed.initialize(&mut grid),
                Err(LifeError::Config(ConfigError::InvalidProbability(p))) if p == probability
            ));
            assert_eq!(grid.population(), 0);
        }
    }

    #[test]
    fn test_seed_json_probability_out_of_range() {
        for text in [
            r#"{"pattern": {"type": "Random", "probability": 0, "seed": 1}}"#,
            r#"{"pattern": {"type": "Random", "probability": 11, "seed": 1}}"#,
        ] {
            let seed: Seed = serde_json::from_str(text).unwrap();
            assert!(matches!(
                seed.validate(),
                Err(ConfigError::InvalidProbability(_))
            ));
            let mut grid = Grid::new(10).unwrap();
            assert!(seed.initialize(&mut grid).is_err());
            assert_eq!(grid.population(), 0);
        }
    }

    #[test]
    fn test_fixed_patterns_always_valid() {
        assert!(Seed::glider(1, 1).validate().is_ok());
        assert!(Seed { pattern: Pattern::Empty }.validate().is_ok());
        assert!(Seed::random(1, None).validate().is_ok());
        assert!(Seed::random(10, None).validate().is_ok());
    }

    #[test]
    fn test_cells_pattern() {
        let seed = Seed {
            pattern: Pattern::Cells {
                cells: vec![(1, 1), (2, 3)],
            },
        };
        let mut grid = Grid::new(3).unwrap();
        seed.initialize(&mut grid).unwrap();
        assert_eq!(grid.population(), 2);
        assert!(grid.get_status(2, 3).unwrap());

        let bad = Seed {
            pattern: Pattern::Cells {
                cells: vec![(0, 1)],
            },
        };
        assert!(bad.initialize(&mut grid).is_err());
    }

    #[test]
    fn test_closure_initializer() {
        let checker = |row: usize, col: usize| (row + col) % 2 == 0;
        let mut grid = Grid::new(4).unwrap();
        checker.initialize(&mut grid).unwrap();
        assert_eq!(grid.population(), 8);
        assert!(grid.get_status(1, 1).unwrap());
        assert!(!grid.get_status(1, 2).unwrap());
    }

    #[test]
    fn test_seed_json() {
        let seed: Seed =
            serde_json::from_str(r#"{"pattern": {"type": "Glider", "row": 2, "col": 3}}"#).unwrap();
        assert!(matches!(seed.pattern, Pattern::Glider { row: 2, col: 3 }));

        let seed: Seed =
            serde_json::from_str(r#"{"pattern": {"type": "Random", "probability": 5}}"#).unwrap();
        assert!(matches!(
            seed.pattern,
            Pattern::Random {
                probability: 5,
                seed: None
            }
        ));
    }
}
