//! Seed types for populating a fresh grid.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::compute::{Grid, GridError};

/// Initial population of a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern to use for seeding.
    pub pattern: Pattern,
}

/// Predefined patterns for initialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// All cells dead.
    #[default]
    Empty,
    /// All cells alive.
    Full,
    /// Each cell alive with probability 1/2.
    Random {
        /// Random seed (None = from entropy).
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Standard glider with its bounding box's top-left at (x, y).
    Glider { x: usize, y: usize },
    /// Explicit list of live cells.
    Cells {
        /// (x, y) entries.
        cells: Vec<(usize, usize)>,
    },
}

/// Live cells of a glider heading down and to the right.
pub const GLIDER: [(usize, usize); 5] = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];

impl Seed {
    /// Write the pattern into `grid`. Cells that fall outside the grid are an
    /// error rather than silently dropped, and the grid is left untouched.
    pub fn apply(&self, grid: &mut Grid) -> Result<(), GridError> {
        match &self.pattern {
            Pattern::Empty => grid.fill(false),
            Pattern::Full => grid.fill(true),
            Pattern::Random { seed } => {
                let mut rng = match seed {
                    Some(s) => StdRng::seed_from_u64(*s),
                    None => StdRng::from_entropy(),
                };
                grid.fill_random(&mut rng);
            }
            Pattern::Glider { x, y } => {
                let cells: Vec<_> = GLIDER
                    .iter()
                    .map(|&(dx, dy)| (x.saturating_add(dx), y.saturating_add(dy)))
                    .collect();
                // A saturated coordinate is usize::MAX, which no grid contains
                set_cells(grid, &cells)?;
            }
            Pattern::Cells { cells } => set_cells(grid, cells)?,
        }
        Ok(())
    }
}

/// Mark every cell in `cells` alive, after checking all of them fit.
fn set_cells(grid: &mut Grid, cells: &[(usize, usize)]) -> Result<(), GridError> {
    let (width, height) = grid.dim();
    if let Some(&(x, y)) = cells.iter().find(|&&(x, y)| x >= width || y >= height) {
        return Err(GridError::OutOfBounds {
            x,
            y,
            width,
            height,
        });
    }
    for &(x, y) in cells {
        grid.set_alive(x, y, true)?;
    }
    Ok(())
}
