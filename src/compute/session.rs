//! Interactive session - one grid, one viewport, and the operations an input
//! layer binds to user actions.

use std::fmt;
use std::path::{Path, PathBuf};

use rand::Rng;

use super::{Direction, Grid, GridError, PixelSize, Point, Viewport};
use crate::schema::{ConfigError, SessionConfig};
use crate::storage::{self, StorageError};

/// Errors surfaced by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Game of Life session state.
///
/// The grid starts at the size of the initial viewport and only ever grows.
pub struct Session {
    grid: Grid,
    viewport: Viewport,
    /// Initial visible cell count, restored by `reset_view`.
    home: (usize, usize),
    save_path: PathBuf,
    generation: u64,
}

impl Session {
    /// Create a session from a validated configuration and apply its seed.
    pub fn new(config: &SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;

        let home = (config.cells.width, config.cells.height);
        let mut grid = Grid::new(home.0, home.1)?;
        config.seed.apply(&mut grid)?;

        let window = PixelSize::new(config.window.width, config.window.height);
        let viewport = Viewport::new(window, home);

        log::debug!(
            "session: {}x{} cells in {}x{}px window, viewport {}",
            home.0,
            home.1,
            window.width,
            window.height,
            viewport
        );

        Ok(Self {
            grid,
            viewport,
            home,
            save_path: config.save_path.clone(),
            generation: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Generations stepped since the session started.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance one generation.
    pub fn step(&mut self) {
        self.grid.step();
        self.generation += 1;
    }

    /// Advance `generations` generations.
    pub fn run(&mut self, generations: u64) {
        for _ in 0..generations {
            self.step();
        }
    }

    /// Pan the viewport, growing the grid as needed.
    pub fn pan(&mut self, direction: Direction, n: usize) -> Result<(), SessionError> {
        self.viewport.pan(&mut self.grid, direction, n)?;
        Ok(())
    }

    pub fn zoom_in(&mut self) -> bool {
        self.viewport.zoom_in()
    }

    pub fn zoom_out(&mut self) -> Result<bool, SessionError> {
        Ok(self.viewport.zoom_out(&mut self.grid)?)
    }

    /// Move the viewport back to the grid origin at the initial cell count.
    pub fn reset_view(&mut self) {
        self.viewport.reset(self.home);
    }

    pub fn clear(&mut self) {
        self.grid.fill(false);
    }

    pub fn fill(&mut self) {
        self.grid.fill(true);
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.grid.fill_random(rng);
    }

    /// Invert the cell under window pixel (px, py), returning the cell and its
    /// new state.
    pub fn toggle_at_pixel(&mut self, px: u32, py: u32) -> Result<(Point, bool), SessionError> {
        let pos = self.viewport.screen_to_grid(px, py);
        let alive = self.grid.toggle(pos.x, pos.y)?;
        Ok((pos, alive))
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// Write the grid to the configured save file.
    pub fn save(&self) -> Result<(), SessionError> {
        storage::save_to_path(&self.grid, &self.save_path)?;
        Ok(())
    }

    /// Read the configured save file into the grid at its current dimensions.
    pub fn load(&mut self) -> Result<(), SessionError> {
        storage::load_from_path(&mut self.grid, &self.save_path)?;
        Ok(())
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats::from_session(self)
    }
}

/// Snapshot of session state for monitoring and debug output.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionStats {
    pub window: PixelSize,
    pub cell_size: PixelSize,
    pub grid_width: usize,
    pub grid_height: usize,
    pub top_left: Point,
    pub bottom_right: Point,
    pub population: usize,
    pub generation: u64,
}

impl SessionStats {
    pub fn from_session(session: &Session) -> Self {
        let view = &session.viewport;
        Self {
            window: view.window(),
            cell_size: view.cell_size(),
            grid_width: session.grid.width(),
            grid_height: session.grid.height(),
            top_left: view.top_left(),
            bottom_right: view.bottom_right(),
            population: session.grid.population(),
            generation: session.generation,
        }
    }

    /// Cells currently in view.
    pub fn visible_cells(&self) -> usize {
        (self.bottom_right.x - self.top_left.x) * (self.bottom_right.y - self.top_left.y)
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== [ DEBUG ] ===")?;
        writeln!(
            f,
            "> Screen Dimensions: screen=<{},{}>px, cell=<{},{}>px",
            self.window.width, self.window.height, self.cell_size.width, self.cell_size.height
        )?;
        writeln!(
            f,
            "> Grid Dimensions: <{},{}>",
            self.grid_width, self.grid_height
        )?;
        writeln!(
            f,
            "> Viewport: <{},{}> to <{},{}>",
            self.top_left.x, self.top_left.y, self.bottom_right.x, self.bottom_right.y
        )?;
        writeln!(f, "> Cells in viewport: {}", self.visible_cells())?;
        writeln!(f, "> Population: {}", self.population)?;
        writeln!(f, "> Generation: {}", self.generation)?;
        write!(f, "=================")
    }
}
